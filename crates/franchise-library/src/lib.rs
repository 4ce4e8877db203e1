//! Franchise library operations that go beyond plain storage.
//!
//! Brainstorming asks the generator for titles and hooks for an entry; a
//! failed or unusable answer simply yields no ideas.

use advisor::{prompts, ContentIdeas, Generator};
use shared::library::thumbnail_url;
use shared::LibraryEntry;
use tracing::{info, warn};

/// Ask the generator for video ideas about `entry`
pub async fn brainstorm<G: Generator + ?Sized>(
    generator: &G,
    entry: &LibraryEntry,
) -> Option<ContentIdeas> {
    let prompt = prompts::brainstorm(&entry.title, entry.format);
    match generator.generate(&prompt).await {
        Ok(value) => {
            let ideas = ContentIdeas::from_value(&value);
            match &ideas {
                Some(i) => info!(
                    title = %entry.title,
                    titles = i.titles.len(),
                    hooks = i.hooks.len(),
                    "Ideas generated"
                ),
                None => warn!(title = %entry.title, "Generator returned no usable ideas"),
            }
            ideas
        }
        Err(e) => {
            warn!(title = %entry.title, error = %e, "Brainstorm unavailable");
            None
        }
    }
}

/// Multi-line text card for one entry
pub fn render_entry(entry: &LibraryEntry) -> String {
    let status = if entry.is_completed() { "COMPLETED" } else { "PLANNED" };
    let mut lines = vec![format!(
        "#{} {} [{}] {}",
        entry.id, entry.title, entry.format, status
    )];

    let mut facts = Vec::new();
    if let Some(media) = entry.media_type {
        facts.push(media.to_string());
    }
    if let Some(count) = entry.unit_count {
        facts.push(format!("{} units", count));
    }
    facts.push(format!("virality {}/10", entry.virality_score));
    facts.push(format!("trend {}", entry.trend));
    lines.push(format!("    {}", facts.join(" | ")));

    if !entry.reasoning.is_empty() {
        lines.push(format!("    {}", entry.reasoning));
    }
    if let Some(link) = entry.link.as_deref().filter(|_| entry.is_completed()) {
        lines.push(format!("    video: {}", link));
        if let Some(thumb) = thumbnail_url(link) {
            lines.push(format!("    thumbnail: {}", thumb));
        }
    }
    for (index, url) in entry.competitors.iter().enumerate() {
        lines.push(format!("    competitor [{}]: {}", index, url));
    }
    if !entry.performance.views.is_empty() || !entry.performance.ctr.is_empty() {
        lines.push(format!(
            "    performance: views {} ctr {}",
            display_or_dash(&entry.performance.views),
            display_or_dash(&entry.performance.ctr)
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Text block for a set of ideas
pub fn render_ideas(ideas: &ContentIdeas) -> String {
    let mut out = String::from("Titles:\n");
    for title in &ideas.titles {
        out.push_str(&format!("  - {}\n", title));
    }
    out.push_str("Hooks:\n");
    for hook in &ideas.hooks {
        out.push_str(&format!("  - {}\n", hook));
    }
    out.push_str(&format!("Thumbnail: {}\n", ideas.thumbnail_idea));
    out
}
