use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FolioError;
use crate::models::slug::Slug;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub caption: String,

    #[serde(alias = "published_date")]
    pub published_date: NaiveDate,

    pub slug: Slug,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithLikes {
    #[serde(flatten)]
    pub article: Article,
    pub likes: i64,
}

/// Posts listed on the home page, newest first.
#[derive(Default, Debug)]
pub struct ArticleCatalog {
    articles: Vec<Article>,
}

impl ArticleCatalog {
    pub fn new(mut articles: Vec<Article>) -> Self {
        articles.sort_by(|a, b| b.published_date.cmp(&a.published_date));

        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn slugs(&self) -> Vec<Slug> {
        self.articles.iter().map(|article| article.slug.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn contains(&self, slug: &Slug) -> bool {
        self.articles.iter().any(|article| &article.slug == slug)
    }

    /// With an empty catalog every slug is accepted.
    pub fn validate(&self, slug: &Slug) -> Result<(), FolioError> {
        if self.is_empty() || self.contains(slug) {
            return Ok(());
        }

        Err(FolioError::NotFound(format!("Post {} not found", slug)))
    }
}
