//! Prompt builders for each generator request.
//!
//! The format rules are stated in the analysis prompt itself; the local
//! engine only validates what comes back.

use shared::{MediaType, Settings, VideoFormat};

/// Prompt for a full format analysis of a franchise
pub fn format_analysis(franchise: &str, settings: &Settings) -> String {
    format!(
        r#"Analyze the TV show or movie franchise "{franchise}".
Return a JSON object with these fields:
- title: string (the franchise's common name)
- mediaType: "TV" or "MOVIE"
- count: number (estimate total episodes or movies)
- averageLengthMinutes: number (approximate length in minutes)
- isCulturallyMassive: boolean (is it known for being endless/huge like One Piece/Pokemon?)
- varietyLevel: "High" or "Low" (do episodes stand alone well like Black Mirror, or are they repetitive?)
- fandomVibe: "Debate" (fans argue about quality) or "Chaos" (fans meme about pain/length)
- viralityScore: integer from 0 to 10 (how likely a video on it is to break out right now)
- trend: "RISING", "FALLING" or "STABLE"
- recommendedFormat: "ONE_SITTING" or "RANKING"
- reasoning: string (2 sentences explaining why based on volume and fandom)

Decide recommendedFormat with these rules, in order:
1. A movie franchise with 60 or more films, or a TV show with {episodes} or more episodes, is ONE_SITTING.
2. Total runtime above {hours} hours for TV (60 hours for movies) is ONE_SITTING.
3. A franchise famous for its sheer length is ONE_SITTING.
4. High variety between entries is RANKING.
5. Otherwise a debating fandom is RANKING and a chaotic, meme-driven fandom is ONE_SITTING.
"#,
        franchise = franchise,
        episodes = settings.episode_absurd_threshold,
        hours = settings.runtime_hours_threshold,
    )
}

/// Prompt asking only for the unit count
pub fn unit_count(franchise: &str, media_type: MediaType) -> String {
    let unit = match media_type {
        MediaType::Tv => "episodes",
        MediaType::Movie => "movies",
    };
    format!(
        r#"How many {unit} does the {media} franchise "{franchise}" have in total?
Return a JSON object with a single field:
- count: number (your best estimate of the total {unit})
"#,
        unit = unit,
        media = media_type,
        franchise = franchise,
    )
}

/// Prompt for video ideas about a library entry
pub fn brainstorm(title: &str, format: VideoFormat) -> String {
    format!(
        r#"Generate content ideas for a YouTube video about the franchise "{title}" using the "{format}" format.
Return JSON with:
- titles: array of 3 clickbaity, high-stakes titles.
- hooks: array of 3 opening lines/hooks (first 5 seconds).
- thumbnailIdea: string describing a high-CTR thumbnail.

Make the tone tailored to a 19-25 year old male audience (Gen Z humor, high energy).
"#,
        title = title,
        format = format,
    )
}
