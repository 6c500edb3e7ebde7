/// Specialty tags offered for mentor profiles and search filters.
pub const ALL_SPECIALTIES: &[&str] = &[
    "Frontend", "React", "TypeScript", "Web Performance",
    "Backend", "Node.js", "Microservices", "AWS", "System Design",
    "Product Management", "Product Strategy", "User Research", "Agile", "Roadmapping",
    "UX/UI Design", "User Experience", "Interaction Design", "Figma", "Design Systems",
    "Data Science", "Machine Learning", "Python", "Data Visualization", "Statistics",
    "DevOps", "CI/CD", "Kubernetes", "Terraform", "Site Reliability",
    "Marketing", "Digital Marketing", "SEO", "Content Strategy", "Brand Building",
    "Mobile Development", "iOS", "Swift", "Android", "Kotlin", "React Native",
    "Cybersecurity", "Network Security", "Penetration Testing", "Incident Response",
    "Venture Capital", "Startups", "Fundraising", "Business Strategy", "Pitching",
    "AI Research", "Natural Language Processing", "Deep Learning", "PyTorch",
    "Entrepreneurship", "Leadership", "Product-Market Fit",
];

/// Returns `true` if `tag` is one of [`ALL_SPECIALTIES`].
pub fn is_known_specialty(tag: &str) -> bool {
    ALL_SPECIALTIES.contains(&tag)
}
