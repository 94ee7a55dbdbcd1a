//! Output generation.
//!
//! - [`corpus`]: writes scraped articles to the CSV corpus
//!
//! # Output Format
//!
//! ```text
//! Headline,Paragraph,URL,Category
//! Title,"Body text, quoted when it holds commas",https://www.bbc.com/pidgin/tori-58312233,nigeria
//! ```

pub mod corpus;
