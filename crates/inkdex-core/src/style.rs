//! Style catalogue - static style metadata and alias lookup

use std::collections::HashMap;

use crate::{Difficulty, RecordId, Style};

/// Lookup table of tattoo styles keyed by style id
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    styles: Vec<Style>,
    by_id: HashMap<String, usize>,
}

impl StyleIndex {
    /// Build an index over the given styles
    ///
    /// Later entries with a duplicate id replace earlier ones.
    pub fn new(styles: Vec<Style>) -> Self {
        let mut index = Self::default();
        for style in styles {
            match index.by_id.get(style.id.as_str()) {
                Some(&pos) => index.styles[pos] = style,
                None => {
                    index.by_id.insert(style.id.0.clone(), index.styles.len());
                    index.styles.push(style);
                }
            }
        }
        index
    }

    /// The built-in catalogue of canonical tattoo styles
    pub fn builtin() -> Self {
        Self::new(builtin_styles())
    }

    pub fn get(&self, id: &str) -> Option<&Style> {
        self.by_id.get(id).map(|&pos| &self.styles[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Every style whose name or alias contains `text`, case-insensitively
    pub fn find_by_alias(&self, text: &str) -> Vec<&Style> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.styles
            .iter()
            .filter(|style| {
                style.name.to_lowercase().contains(&needle)
                    || style.aliases.iter().any(|a| a.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Styles a free-text studio specialty refers to
    ///
    /// A style matches when its id, name or one of its aliases appears in the
    /// specialty as a run of whole words ("Japanese Irezumi" resolves to
    /// `japanese`). A match that sits inside a longer match of another style
    /// is dropped, so "Neo-Traditional" resolves to `neo_traditional` only.
    pub fn resolve_specialty(&self, specialty: &str) -> Vec<&Style> {
        let tokens = words(specialty);
        if tokens.is_empty() {
            return Vec::new();
        }

        let matched: Vec<(&Style, Vec<Span>)> = self
            .styles
            .iter()
            .filter_map(|style| {
                let spans: Vec<Span> = std::iter::once(style.id.as_str())
                    .chain(std::iter::once(style.name.as_str()))
                    .chain(style.aliases.iter().map(String::as_str))
                    .flat_map(|term| find_spans(&tokens, &words(term)))
                    .collect();
                (!spans.is_empty()).then_some((style, spans))
            })
            .collect();

        matched
            .iter()
            .filter(|(style, spans)| {
                spans.iter().any(|span| {
                    !matched.iter().any(|(other, other_spans)| {
                        other.id != style.id && other_spans.iter().any(|o| o.strictly_contains(span))
                    })
                })
            })
            .map(|(style, _)| *style)
            .collect()
    }
}

/// Half-open word range inside a specialty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn strictly_contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end && self.end - self.start > other.end - other.start
    }
}

/// Lowercased alphanumeric words; `_`, `-` and spaces all separate
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every position where `term` occurs in `words` as a contiguous run
fn find_spans(words: &[String], term: &[String]) -> Vec<Span> {
    if term.is_empty() || term.len() > words.len() {
        return Vec::new();
    }
    (0..=words.len() - term.len())
        .filter(|&start| words[start..start + term.len()] == *term)
        .map(|start| Span {
            start,
            end: start + term.len(),
        })
        .collect()
}

fn style(
    id: &str,
    name: &str,
    aliases: &[&str],
    difficulty: Difficulty,
    popularity: u32,
    characteristics: &[&str],
    description: &str,
) -> Style {
    Style {
        id: RecordId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
        difficulty,
        popularity,
        characteristics: characteristics.iter().map(|s| s.to_string()).collect(),
    }
}

fn builtin_styles() -> Vec<Style> {
    use Difficulty::*;

    vec![
        style(
            "old_school",
            "Old School",
            &["American Traditional", "Sailor Jerry", "Classic"],
            Beginner,
            85,
            &["bold outlines", "limited palette", "nautical imagery"],
            "Bold black outlines and saturated primary colours drawn from early sailor flash.",
        ),
        style(
            "traditional",
            "Traditional",
            &["Trad", "Flash"],
            Beginner,
            90,
            &["bold outlines", "solid colour", "iconic motifs"],
            "Timeless flash designs with heavy linework and solid colour packing.",
        ),
        style(
            "new_school",
            "New School",
            &["Cartoon", "Graffiti"],
            Intermediate,
            60,
            &["exaggerated proportions", "bright colours", "cartoon influence"],
            "Cartoonish, exaggerated imagery with vivid colour and depth.",
        ),
        style(
            "neo_traditional",
            "Neo Traditional",
            &["Neo Trad", "Neo-Traditional"],
            Intermediate,
            80,
            &["varied line weight", "rich palette", "ornamental detail"],
            "Traditional foundations with richer palettes and illustrative detail.",
        ),
        style(
            "tribal",
            "Tribal",
            &["Polynesian", "Maori", "Ta Moko"],
            Intermediate,
            55,
            &["solid black", "flowing shapes", "cultural patterns"],
            "Heavy black patterns rooted in Pacific and indigenous traditions.",
        ),
        style(
            "blackwork",
            "Blackwork",
            &["Black Work", "Blackout"],
            Intermediate,
            75,
            &["solid black fills", "high contrast", "negative space"],
            "Large areas of solid black ink used for bold graphic contrast.",
        ),
        style(
            "dotwork",
            "Dotwork",
            &["Stippling", "Pointillism"],
            Advanced,
            65,
            &["stippled shading", "gradients from dots", "sacred geometry"],
            "Images and shading built entirely from individual dots.",
        ),
        style(
            "geometric",
            "Geometric",
            &["Sacred Geometry", "Mandala"],
            Advanced,
            70,
            &["precise lines", "symmetry", "repeating shapes"],
            "Precise shapes, symmetry and repeating patterns.",
        ),
        style(
            "japanese",
            "Japanese",
            &["Irezumi", "Tebori", "Japanese Traditional"],
            Advanced,
            88,
            &["large scale", "wind bars", "mythological subjects"],
            "Large-scale Irezumi work featuring koi, dragons and waves.",
        ),
        style(
            "lettering",
            "Lettering",
            &["Script", "Calligraphy", "Typography"],
            Beginner,
            72,
            &["custom fonts", "script", "text layout"],
            "Words and phrases rendered in custom scripts and typefaces.",
        ),
        style(
            "biomechanical",
            "Biomechanical",
            &["Biomech", "Cyber"],
            Advanced,
            40,
            &["mechanical parts", "organic fusion", "depth illusion"],
            "Machinery fused with anatomy, as if the skin were torn away.",
        ),
        style(
            "watercolour",
            "Watercolour",
            &["Watercolor", "Paint Splash"],
            Advanced,
            68,
            &["soft washes", "colour bleeds", "minimal outlines"],
            "Washes of colour that mimic watercolour painting.",
        ),
        style(
            "floral",
            "Floral",
            &["Botanical", "Flowers"],
            Beginner,
            78,
            &["organic shapes", "botanical detail", "flowing composition"],
            "Flowers and botanical studies in any rendering style.",
        ),
        style(
            "fineline",
            "Fine Line",
            &["Fineline", "Single Needle"],
            Intermediate,
            86,
            &["thin lines", "delicate detail", "small scale"],
            "Delicate single-needle linework with subtle detail.",
        ),
        style(
            "realism",
            "Realism",
            &["Photorealism", "Black and Grey Realism", "Colour Realism"],
            Advanced,
            82,
            &["smooth shading", "photographic detail", "depth"],
            "Photographic renderings with smooth blends and fine detail.",
        ),
        style(
            "minimalist",
            "Minimalist",
            &["Minimal", "Simple"],
            Beginner,
            84,
            &["clean lines", "negative space", "small designs"],
            "Simple, clean designs with generous negative space.",
        ),
        style(
            "surrealism",
            "Surrealism",
            &["Surreal", "Dreamlike"],
            Advanced,
            45,
            &["dream imagery", "unexpected combinations", "illusion"],
            "Dreamlike, impossible scenes inspired by surrealist painting.",
        ),
        style(
            "portrait",
            "Portrait",
            &["Portraiture", "Memorial Portrait"],
            Advanced,
            62,
            &["likeness", "facial detail", "soft shading"],
            "Faithful likenesses of people and pets.",
        ),
        style(
            "sketch",
            "Sketch",
            &["Pencil Sketch", "Drawing"],
            Intermediate,
            50,
            &["construction lines", "loose strokes", "hand-drawn look"],
            "Artwork that keeps the raw look of a pencil sketch.",
        ),
        style(
            "illustrative",
            "Illustrative",
            &["Illustration", "Etching", "Engraving"],
            Intermediate,
            66,
            &["strong linework", "hatching", "storybook feel"],
            "Illustration-led work drawing on etching and printmaking.",
        ),
        style(
            "ornamental",
            "Ornamental",
            &["Decorative", "Jewellery"],
            Intermediate,
            58,
            &["filigree", "lace patterns", "body flow"],
            "Decorative patterns that follow and frame the body.",
        ),
        style(
            "trash_polka",
            "Trash Polka",
            &["Trash Polka Realism", "Collage"],
            Advanced,
            42,
            &["red and black", "collage", "abstract strokes"],
            "Chaotic collage of realism and graphic strokes in red and black.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let index = StyleIndex::builtin();
        assert_eq!(index.len(), 22);
        assert_eq!(index.get("japanese").unwrap().name, "Japanese");
        assert!(index.get("unknown").is_none());
    }

    #[test]
    fn test_find_by_alias_matches_name_and_alias() {
        let index = StyleIndex::builtin();

        let ids: Vec<&str> = index.find_by_alias("irezumi").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["japanese"]);

        let ids: Vec<&str> = index.find_by_alias("TRADITIONAL").iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"traditional"));
        assert!(ids.contains(&"neo_traditional"));
        assert!(ids.contains(&"old_school"));
    }

    #[test]
    fn test_find_by_alias_empty_input() {
        let index = StyleIndex::builtin();
        assert!(index.find_by_alias("").is_empty());
        assert!(index.find_by_alias("   ").is_empty());
    }

    #[test]
    fn test_resolve_specialty() {
        let index = StyleIndex::builtin();

        let ids: Vec<&str> = index
            .resolve_specialty("Japanese Irezumi")
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert!(ids.contains(&"japanese"));

        let ids: Vec<&str> = index.resolve_specialty("trash polka").iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"trash_polka"));
    }

    fn resolved<'a>(index: &'a StyleIndex, specialty: &str) -> Vec<&'a str> {
        index.resolve_specialty(specialty).iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_resolve_specialty_needs_whole_words() {
        let index = StyleIndex::builtin();

        assert_eq!(resolved(&index, "Neo-Traditional"), vec!["neo_traditional"]);
        assert_eq!(resolved(&index, "neo traditional"), vec!["neo_traditional"]);
        assert_eq!(resolved(&index, "American Traditional"), vec!["old_school"]);
        assert_eq!(resolved(&index, "Micro Realism"), vec!["realism"]);
        assert_eq!(resolved(&index, "Traditional"), vec!["traditional"]);
        assert_eq!(resolved(&index, "Trad flash"), vec!["traditional"]);

        // "Minimal" is an alias of minimalist but not a word of "Minimalism"
        assert!(resolved(&index, "Minimalism").is_empty());
        assert!(resolved(&index, "  ").is_empty());
    }

    #[test]
    fn test_duplicate_ids_replace() {
        let mut custom = StyleIndex::builtin().get("dotwork").unwrap().clone();
        custom.popularity = 1;
        let mut styles = builtin_styles();
        styles.push(custom);

        let index = StyleIndex::new(styles);
        assert_eq!(index.len(), 22);
        assert_eq!(index.get("dotwork").unwrap().popularity, 1);
    }
}
