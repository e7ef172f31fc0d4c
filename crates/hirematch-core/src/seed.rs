//! Sample candidate pool loaded into a fresh store.

use crate::models::NewCandidate;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The five sample profiles, in insertion order.
///
/// `match_score` carries a baseline relevance used by the substring filter
/// ordering; ranked searches always recompute it.
pub fn sample_candidates() -> Vec<NewCandidate> {
    vec![
        NewCandidate {
            name: "Ananya Mehra".to_string(),
            title: "Senior Java Developer".to_string(),
            location: "Pune".to_string(),
            experience: "5 years".to_string(),
            phone: "+91 63547XXXX".to_string(),
            email: "ananya.mehra@email.com".to_string(),
            skills: strings(&["Java", "Spring Boot", "Microservices", "AWS", "Hibernate", "REST APIs"]),
            resume: "Experienced Java developer with 5 years in enterprise applications. \
                     Proficient in Spring Boot, microservices architecture, and cloud platforms. \
                     Led multiple projects involving scalable backend systems."
                .to_string(),
            match_score: Some(95),
            avatar: Some(
                "https://images.unsplash.com/photo-1494790108755-2616b612b890?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"
                    .to_string(),
            ),
        },
        NewCandidate {
            name: "Rahul Sharma".to_string(),
            title: "Java Full Stack Developer".to_string(),
            location: "Bangalore".to_string(),
            experience: "6 years".to_string(),
            phone: "+91 98547XXXX".to_string(),
            email: "rahul.sharma@email.com".to_string(),
            skills: strings(&["Java", "React", "Node.js", "MongoDB", "Spring", "JavaScript"]),
            resume: "Full-stack developer specializing in Java backend and React frontend. \
                     6 years of experience building end-to-end applications. \
                     Strong knowledge of modern web technologies and database design."
                .to_string(),
            match_score: Some(92),
            avatar: Some(
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"
                    .to_string(),
            ),
        },
        NewCandidate {
            name: "Priya Patel".to_string(),
            title: "Backend Java Developer".to_string(),
            location: "Mumbai".to_string(),
            experience: "4 years".to_string(),
            phone: "+91 88547XXXX".to_string(),
            email: "priya.patel@email.com".to_string(),
            skills: strings(&["Java", "Spring", "MySQL", "Docker", "Kubernetes", "Jenkins"]),
            resume: "Backend specialist with strong Java and Spring expertise. \
                     Experience with containerization and CI/CD pipelines. \
                     Focused on building robust, scalable server-side applications."
                .to_string(),
            match_score: Some(88),
            avatar: Some(
                "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"
                    .to_string(),
            ),
        },
        NewCandidate {
            name: "Arjun Singh".to_string(),
            title: "Java Software Engineer".to_string(),
            location: "Hyderabad".to_string(),
            experience: "5 years".to_string(),
            phone: "+91 77547XXXX".to_string(),
            email: "arjun.singh@email.com".to_string(),
            skills: strings(&["Java", "Hibernate", "REST APIs", "Jenkins", "Maven", "Git"]),
            resume: "Software engineer with extensive Java development experience. \
                     Proficient in ORM frameworks and API development. \
                     Strong background in software engineering practices and version control."
                .to_string(),
            match_score: Some(85),
            avatar: Some(
                "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"
                    .to_string(),
            ),
        },
        NewCandidate {
            name: "Sneha Reddy".to_string(),
            title: "Java Developer".to_string(),
            location: "Chennai".to_string(),
            experience: "3 years".to_string(),
            phone: "+91 99547XXXX".to_string(),
            email: "sneha.reddy@email.com".to_string(),
            skills: strings(&["Java", "Spring Framework", "PostgreSQL", "JUnit", "Maven"]),
            resume: "Java developer with 3 years of experience in web application development. \
                     Strong foundation in Spring framework and database technologies. \
                     Experience with unit testing and build tools."
                .to_string(),
            match_score: Some(82),
            avatar: Some(
                "https://images.unsplash.com/photo-1580489944761-15a19d654956?ixlib=rb-4.0.3&auto=format&fit=crop&w=150&h=150"
                    .to_string(),
            ),
        },
    ]
}
