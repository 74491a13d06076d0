use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use ts_rs::TS;

/**
 * Video
 * represent a single catalog entry, as shipped in the bundled dataset
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "index.ts")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel: String,
    pub views: String,
    pub upload_time: String,
    pub duration: String,
    pub category: String,
    pub featured: bool,
}

impl Video {
    /// Case-insensitive substring match on title, description and channel.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.channel]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Numeric view count parsed from the display string, 0 when unparsable
    pub fn view_count(&self) -> u64 {
        parse_view_count(&self.views).unwrap_or(0)
    }
}

/**
 * Shape of a dataset document: `{ "videos": [...] }`
 */
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoCollection {
    pub videos: Vec<Video>,
}

/**
 * Known categories, as listed in the sidebar. Filtering itself works on plain
 * strings, so values outside of this list are still accepted.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    All,
    Dogs,
    Cats,
    Birds,
    Hamsters,
    Rabbits,
    Sloths,
    Reptiles,
}

/**
 * Parse display counts such as "1.2M views", "850K views" or "12,345 views"
 */
pub fn parse_view_count(views: &str) -> Option<u64> {
    let token = views.split_whitespace().next()?.replace(',', "");

    let (number, multiplier) = match token.chars().last()? {
        'k' | 'K' => (&token[..token.len() - 1], 1_000.0),
        'm' | 'M' => (&token[..token.len() - 1], 1_000_000.0),
        'b' | 'B' => (&token[..token.len() - 1], 1_000_000_000.0),
        _ => (token.as_str(), 1.0),
    };

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    Some((value * multiplier).round() as u64)
}
