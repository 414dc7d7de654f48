//! # Curated Ground-Truth Annotations
//!
//! Ten manually annotated examples with real catalog descriptions, used by
//! the evaluation scorer for per-field accuracy. Static and read-only; list
//! order is irrelevant.

use crate::schema::ContentMetadata;

/// A ground-truth pair: the source item and the record a correct extraction
/// should produce.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub title: String,
    pub description: String,
    pub expected: ContentMetadata,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn annotation(
    title: &str,
    description: &str,
    genres: &[&str],
    themes: &[&str],
    mood: &str,
    target_audience: &str,
    content_warnings: &[&str],
) -> Annotation {
    Annotation {
        title: title.to_string(),
        description: description.to_string(),
        expected: ContentMetadata {
            genres: strings(genres),
            themes: strings(themes),
            mood: mood.to_string(),
            target_audience: target_audience.to_string(),
            content_warnings: strings(content_warnings),
        },
    }
}

/// The curated annotation list.
pub fn ground_truth() -> Vec<Annotation> {
    vec![
        annotation(
            "3%",
            "In a future where the elite inhabit an island paradise far from the crowded slums, you get one chance to join the 3% saved from squalor.",
            &["Sci-Fi", "Drama", "Thriller"],
            &["inequality", "survival", "ambition"],
            "dark",
            "adults",
            &["violence"],
        ),
        annotation(
            "7:19",
            "After a devastating earthquake hits Mexico City, trapped survivors from all walks of life wait to be rescued while trying desperately to stay alive.",
            &["Drama", "Thriller"],
            &["survival", "community", "disaster"],
            "tense",
            "adults",
            &["death", "frightening scenes"],
        ),
        annotation(
            "23:59",
            "When an army recruit is found dead, his fellow soldiers are forced to confront a terrifying secret that's haunting their jungle island training camp.",
            &["Horror", "Mystery", "Thriller"],
            &["death", "fear", "secrets"],
            "eerie",
            "adults",
            &["violence", "death", "frightening scenes"],
        ),
        annotation(
            "9",
            "In a postapocalyptic world, rag-doll robots hide in fear from dangerous machines out to exterminate them, until a brave newcomer joins the group.",
            &["Animation", "Sci-Fi", "Adventure"],
            &["survival", "courage", "friendship"],
            "dark",
            "teens",
            &["violence", "frightening scenes"],
        ),
        annotation(
            "21",
            "A brilliant group of students become card-counting experts with the intent of swindling millions out of Las Vegas casinos by playing blackjack.",
            &["Drama", "Thriller", "Crime"],
            &["ambition", "deception", "risk"],
            "thrilling",
            "adults",
            &["gambling"],
        ),
        annotation(
            "Altered Minds",
            "A genetics professor experiments with a treatment for his comatose sister that blends medical and shamanic cures, but unlocks a shocking side effect.",
            &["Sci-Fi", "Drama", "Thriller"],
            &["science", "family", "experimentation"],
            "suspenseful",
            "adults",
            &["frightening scenes"],
        ),
        annotation(
            "Cadaver",
            "After an awful accident, a couple admitted to a grisly hospital are separated and must find each other to escape before death finds them.",
            &["Horror", "Thriller"],
            &["love", "survival", "death"],
            "eerie",
            "adults",
            &["violence", "gore", "frightening scenes"],
        ),
        annotation(
            "187",
            "After one of his high school students attacks him, dedicated teacher Trevor Garfield grows weary of the gang warfare in the New York City school system and moves to California to teach there, thinking it must be a less hostile environment.",
            &["Drama", "Crime"],
            &["education", "violence", "perseverance"],
            "dramatic",
            "adults",
            &["violence"],
        ),
        annotation(
            "Clinical",
            "When a doctor goes missing, his psychiatrist wife treats the bizarre medical condition of a psychic patient, who knows much more than he's leading on.",
            &["Mystery", "Thriller"],
            &["deception", "secrets", "psychology"],
            "suspenseful",
            "adults",
            &[],
        ),
        annotation(
            "The Haunting",
            "An architect and his wife move into a castle that is slated to become a luxury hotel. But something inside is determined to stop the renovation.",
            &["Horror", "Mystery"],
            &["fear", "supernatural", "isolation"],
            "eerie",
            "adults",
            &["frightening scenes"],
        ),
    ]
}
