//! Prompt handling: enhancement template, built-in suggestions, file naming

use crate::error::PipelineError;

/// Longest slug kept in a download file name, in characters
pub const MAX_SLUG_CHARS: usize = 30;

/// A ready-made prompt offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// Decorative emoji
    pub emoji: &'static str,
    /// Short display label
    pub label: &'static str,
    /// Prompt text sent when picked
    pub prompt: &'static str,
}

const fn suggestion(emoji: &'static str, label: &'static str, prompt: &'static str) -> Suggestion {
    Suggestion {
        emoji,
        label,
        prompt,
    }
}

/// Built-in prompt suggestions
pub const SUGGESTIONS: [Suggestion; 20] = [
    suggestion("🦕", "Dinosaur", "friendly t-rex dinosaur"),
    suggestion("🚗", "Race Car", "cool sports race car"),
    suggestion("🦄", "Unicorn", "magical unicorn with rainbow mane"),
    suggestion("🚀", "Rocket", "space rocket ship flying to moon"),
    suggestion("🏰", "Castle", "fairy tale princess castle"),
    suggestion("🐱", "Kitten", "cute fluffy kitten playing with yarn"),
    suggestion("🦋", "Butterfly", "beautiful butterfly with detailed wings"),
    suggestion("🤖", "Robot", "friendly cartoon robot"),
    suggestion("🧜‍♀️", "Mermaid", "beautiful mermaid swimming underwater"),
    suggestion("🐉", "Dragon", "cute baby dragon breathing fire"),
    suggestion("🌸", "Flowers", "garden of sunflowers and roses"),
    suggestion("🦁", "Lion", "majestic lion with big mane"),
    suggestion("🐕", "Puppy", "happy puppy dog playing"),
    suggestion("🦖", "Triceratops", "triceratops dinosaur eating plants"),
    suggestion("🧚", "Fairy", "magical fairy with sparkly wings"),
    suggestion("🏴‍☠️", "Pirate", "pirate ship on the ocean"),
    suggestion("🦸", "Superhero", "superhero flying through clouds"),
    suggestion("🎠", "Carousel", "carousel horse at carnival"),
    suggestion("🐘", "Elephant", "baby elephant spraying water"),
    suggestion("🦉", "Owl", "wise owl sitting on tree branch"),
];

/// Trim a user prompt, rejecting blank input
pub fn normalize(prompt: &str) -> Result<&str, PipelineError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }
    Ok(trimmed)
}

/// Wrap a subject in the line-art template sent to the generator
pub fn enhance(subject: &str) -> String {
    format!(
        "simple children's coloring book page of {subject}, black and white, \
         thick clean outlines, no shading, no gradients, no gray, no filled areas, \
         pure white background, cartoon style, vector art style, crisp lines, \
         minimalist, easy to color, isolated subject, no texture, \
         high contrast black lines on white"
    )
}

/// File name for saving a page: `coloring-page-{slug}.png`.
///
/// Each run of whitespace or characters that are not allowed in file names
/// (path separators, `:*?"<>|`, control characters) becomes a single `-`.
/// The result is lowercased and cut to [`MAX_SLUG_CHARS`] characters.
pub fn download_file_name(prompt: &str) -> String {
    let mut dashed = String::with_capacity(prompt.len());
    let mut in_space = false;
    for c in prompt.chars() {
        if c.is_whitespace() || is_unsafe_in_file_name(c) {
            if !in_space {
                dashed.push('-');
            }
            in_space = true;
        } else {
            dashed.push(c);
            in_space = false;
        }
    }

    let slug: String = dashed.to_lowercase().chars().take(MAX_SLUG_CHARS).collect();
    format!("coloring-page-{slug}.png")
}

fn is_unsafe_in_file_name(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}
