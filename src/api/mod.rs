// Catalog and lyrics API clients

pub mod catalog;
pub mod lyrics;
