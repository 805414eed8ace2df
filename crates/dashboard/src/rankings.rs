// File: crates/dashboard/src/rankings.rs
// Summary: Display model for the best-sellers list.

use chart_core::format::format_grouped;

use crate::api::BookRanking;

pub const PLACEHOLDER_COVER: &str = "/static/images/placeholder-book.svg";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_RANKINGS: &str = "No rankings available.";

#[derive(Clone, Debug, PartialEq)]
pub struct RankingCard {
    /// 1-based position in the list as served.
    pub position: usize,
    pub title: String,
    pub author: String,
    /// `Rank: #1,234` or `Rank: #N/A`.
    pub rank_text: String,
    pub cover_image: String,
    pub link: Option<String>,
}

impl RankingCard {
    pub fn from_book(book: &BookRanking, position: usize) -> Self {
        let author = book
            .author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();
        let rank = match book.current_bsr {
            Some(v) if v.is_finite() && v != 0.0 => format_grouped(v),
            _ => "N/A".to_string(),
        };
        let cover_image = book
            .cover_image
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(PLACEHOLDER_COVER)
            .to_string();
        Self {
            position,
            title: book.name.clone(),
            author,
            rank_text: format!("Rank: #{rank}"),
            cover_image,
            link: book.amazon_link.clone().filter(|l| !l.is_empty()),
        }
    }
}

/// Cards in server order, numbered from 1.
pub fn cards(books: &[BookRanking]) -> Vec<RankingCard> {
    books.iter().enumerate().map(|(i, b)| RankingCard::from_book(b, i + 1)).collect()
}
