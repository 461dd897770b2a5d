//! カタログの初期データ投入

use super::catalog;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use truecrime_common::error::ServerResult;
use truecrime_common::types::{
    Book, CatalogKind, Documentary, DocumentarySeries, DramaSeries, Movie, Podcast,
};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// すべてのカタログコレクションを空にして初期データを投入する
///
/// # Returns
/// * `Ok(usize)` - 投入したエントリ数
pub async fn seed_catalog(pool: &SqlitePool) -> ServerResult<usize> {
    for kind in CatalogKind::ALL {
        let removed = catalog::clear(pool, kind).await?;
        tracing::debug!(collection = kind.collection(), removed, "Cleared catalog collection");
    }

    catalog::insert(
        pool,
        CatalogKind::Movies,
        &Movie {
            title: "hej hej".to_string(),
            swedish_title: None,
            released: NaiveDate::from_ymd_opt(2000, 2, 1),
            synopsis: "en berättelse om mod".to_string(),
            director: None,
            cast: Vec::new(),
            rating: 5.0,
            tags: tags(&["murder", "comedy", "coldcase"]),
            image: Some("movie.png".to_string()),
        },
    )
    .await?;

    catalog::insert(
        pool,
        CatalogKind::Books,
        &Book {
            title: "Murder".to_string(),
            swedish_title: None,
            author: "Bla bla".to_string(),
            synopsis: "Det var en gång...".to_string(),
            released: None,
            isbn: 12345678910,
            rating: 5.0,
            tags: tags(&["comedy", "murder", "coldcase"]),
            image: None,
        },
    )
    .await?;

    catalog::insert(
        pool,
        CatalogKind::Documentaries,
        &Documentary {
            title: "En dokumentär".to_string(),
            swedish_title: None,
            released: None,
            synopsis: "Fyre festival the greatest party that never happened.".to_string(),
            director: None,
            rating: 5.0,
            tags: tags(&["comedy", "white collar crime", "coldcase"]),
            image: None,
        },
    )
    .await?;

    catalog::insert(
        pool,
        CatalogKind::DramaSeries,
        &DramaSeries {
            title: "A tv-series".to_string(),
            swedish_title: Some("En dramaserie".to_string()),
            released: None,
            synopsis: "En dramaserie i världsklass.".to_string(),
            director: None,
            cast: Vec::new(),
            seasons: 2,
            rating: 2.0,
            tags: tags(&["swedish", "crime", "comedy"]),
            image: None,
        },
    )
    .await?;

    catalog::insert(
        pool,
        CatalogKind::DocumentarySeries,
        &DocumentarySeries {
            title: "True Crime Criminals".to_string(),
            swedish_title: None,
            released: NaiveDate::from_ymd_opt(2011, 10, 1),
            synopsis: "En dokumentärserie i världsklass.".to_string(),
            seasons: 3,
            rating: 3.0,
            director: None,
            tags: tags(&["cold case", "murder"]),
            image: None,
        },
    )
    .await?;

    catalog::insert(
        pool,
        CatalogKind::Podcasts,
        &Podcast {
            title: "My favorite Murder".to_string(),
            hosts: tags(&["Karen Kilgariff", "Georgia Hardstark"]),
            first_aired: None,
            synopsis: "My favorite murder is the best podcast.".to_string(),
            produced_by: Some("Exactly Right".to_string()),
            website: "www.karen.com".to_string(),
            rating: None,
            tags: tags(&["comedy", "life", "discussion"]),
            image: None,
        },
    )
    .await?;

    let seeded = CatalogKind::ALL.len();
    tracing::info!(entries = seeded, "Catalog seeded");
    Ok(seeded)
}
