//! Built-in datasets loaded on first listing of each kind.
//!
//! Every seed item carries a fixed id so a retried seed overwrites instead
//! of duplicating.

use crate::chat::{ChatBoard, ChatMessage};
use crate::mentor::Mentor;
use crate::user::User;

const SEED_EPOCH_MS: i64 = 1_735_689_600_000;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub(crate) fn users() -> Vec<User> {
    [
        ("u1", "User A", "user.a@example.com", "Aspiring product designer.", false),
        ("u2", "User B", "user.b@example.com", "Backend engineer moving into SRE.", false),
        ("u3", "Sarah Chen", "sarah.chen@example.com", "Design mentor.", true),
    ]
    .into_iter()
    .map(|(id, name, email, bio, is_mentor)| User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        password_hash: String::new(),
        bio: bio.into(),
        is_mentor,
    })
    .collect()
}

pub(crate) fn mentors() -> Vec<Mentor> {
    let rows: [(&str, &str, &str, &str, &[&str], &str); 8] = [
        (
            "mentor-1",
            "Sarah Chen",
            "Senior Product Designer",
            "Figma",
            &["UX/UI Design", "Figma", "Design Systems"],
            "Ten years shipping design tools used by millions.",
        ),
        (
            "mentor-2",
            "David Rodriguez",
            "Staff Software Engineer",
            "Stripe",
            &["Backend", "System Design", "Microservices"],
            "Builds payment infrastructure and loves a good whiteboard session.",
        ),
        (
            "mentor-3",
            "Priya Patel",
            "Director of Product",
            "Notion",
            &["Product Management", "Product Strategy", "Roadmapping"],
            "Helps new PMs find their footing and their users.",
        ),
        (
            "mentor-4",
            "Marcus Johnson",
            "Principal Data Scientist",
            "Netflix",
            &["Data Science", "Machine Learning", "Python"],
            "Recommendation systems, experimentation and statistics.",
        ),
        (
            "mentor-5",
            "Emily Wong",
            "Engineering Manager",
            "Vercel",
            &["Frontend", "React", "TypeScript", "Leadership"],
            "Former IC turned manager who still reviews front-end code.",
        ),
        (
            "mentor-6",
            "James Okafor",
            "Site Reliability Lead",
            "Cloudflare",
            &["DevOps", "Kubernetes", "Site Reliability"],
            "Keeps large fleets boring in the best way.",
        ),
        (
            "mentor-7",
            "Laura Martinez",
            "Head of Growth",
            "Canva",
            &["Marketing", "Digital Marketing", "Content Strategy"],
            "Growth loops, brand and storytelling.",
        ),
        (
            "mentor-8",
            "Kenji Tanaka",
            "Founder & Partner",
            "Seedline Ventures",
            &["Venture Capital", "Startups", "Fundraising"],
            "Two exits, now backing first-time founders.",
        ),
    ];
    rows.into_iter()
        .map(|(id, name, title, company, specialties, bio)| Mentor {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            company: company.into(),
            specialties: tags(specialties),
            bio: bio.into(),
            image_url: format!("https://i.pravatar.cc/300?u={id}"),
        })
        .collect()
}

pub(crate) fn chats() -> Vec<ChatBoard> {
    let message = |id: &str, chat_id: &str, user_id: &str, text: &str, offset: i64| ChatMessage {
        id: id.into(),
        chat_id: chat_id.into(),
        user_id: user_id.into(),
        text: text.into(),
        ts: SEED_EPOCH_MS + offset,
    };
    vec![
        ChatBoard {
            id: "c1".into(),
            title: "General".into(),
            messages: vec![message("m1", "c1", "u1", "Hello", 0)],
        },
        ChatBoard {
            id: "c2".into(),
            title: "Mentorship Chat: User A & Sarah Chen".into(),
            messages: vec![
                message("m2", "c2", "u1", "Thanks for accepting my request!", 60_000),
                message("m3", "c2", "u3", "Happy to help. What are you working on?", 120_000),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialties::is_known_specialty;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_per_kind() {
        let users: HashSet<_> = users().into_iter().map(|u| u.id).collect();
        assert_eq!(users.len(), 3);
        let mentors: HashSet<_> = mentors().into_iter().map(|m| m.id).collect();
        assert_eq!(mentors.len(), 8);
        let chats: HashSet<_> = chats().into_iter().map(|c| c.id).collect();
        assert_eq!(chats.len(), 2);
    }

    #[test]
    fn mentor_specialties_come_from_catalogue() {
        for mentor in mentors() {
            for tag in &mentor.specialties {
                assert!(is_known_specialty(tag), "{} has unknown tag {tag}", mentor.id);
            }
        }
    }

    #[test]
    fn seeded_messages_belong_to_their_board() {
        for board in chats() {
            assert!(board.messages.iter().all(|m| m.chat_id == board.id));
        }
    }
}
