//! The paper store: keyed storage with keyword search, tag filtering,
//! and pagination.
//!
//! Every listing is ordered by `date_added` descending. `total` always
//! reflects the filtered result set, not the whole store.

use sqlx::SqlitePool;
use tracing::debug;

use crate::models::{decode_list, encode_list, PaperRecord};
use crate::pagination;
use crate::Result;

const SELECT_COLUMNS: &str = "id, title, abstract, authors, categories, tag, \
     pdf_url, source_url, github_url, local_pdf_path, local_source_path, \
     local_github_path, bibtex, date_added";

/// One page of a listing plus the filtered total
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<PaperRecord>,
    pub total: i64,
}

/// Durable keyed storage for paper records
#[derive(Clone)]
pub struct PaperStore {
    pool: SqlitePool,
}

/// Row shape as stored; list columns hold the JSON codec text
#[derive(Debug, sqlx::FromRow)]
struct PaperRow {
    id: String,
    title: String,
    #[sqlx(rename = "abstract")]
    abstract_text: String,
    authors: String,
    categories: String,
    tag: String,
    pdf_url: Option<String>,
    source_url: Option<String>,
    github_url: Option<String>,
    local_pdf_path: Option<String>,
    local_source_path: Option<String>,
    local_github_path: Option<String>,
    bibtex: Option<String>,
    date_added: String,
}

impl From<PaperRow> for PaperRecord {
    fn from(row: PaperRow) -> Self {
        PaperRecord {
            id: row.id,
            title: row.title,
            abstract_text: row.abstract_text,
            authors: decode_list(&row.authors),
            categories: decode_list(&row.categories),
            tag: row.tag,
            pdf_url: row.pdf_url,
            source_url: row.source_url,
            github_url: row.github_url,
            local_pdf_path: row.local_pdf_path,
            local_source_path: row.local_source_path,
            local_github_path: row.local_github_path,
            bibtex: row.bibtex,
            date_added: row.date_added,
        }
    }
}

impl PaperStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or fully replace the record with this id.
    ///
    /// Replacement is not a merge: callers wanting to preserve fields
    /// must read-modify-write.
    pub async fn upsert(&self, record: &PaperRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO papers
                (id, title, abstract, authors, categories, tag,
                 pdf_url, source_url, github_url,
                 local_pdf_path, local_source_path, local_github_path,
                 bibtex, date_added)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.abstract_text)
        .bind(encode_list(&record.authors))
        .bind(encode_list(&record.categories))
        .bind(&record.tag)
        .bind(&record.pdf_url)
        .bind(&record.source_url)
        .bind(&record.github_url)
        .bind(&record.local_pdf_path)
        .bind(&record.local_source_path)
        .bind(&record.local_github_path)
        .bind(&record.bibtex)
        .bind(&record.date_added)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<PaperRecord>> {
        let sql = format!("SELECT {} FROM papers WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, PaperRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PaperRecord::from))
    }

    /// Unfiltered listing, newest first
    pub async fn list_page(&self, page: i64, page_size: i64) -> Result<Page> {
        self.search(&[], None, page, page_size).await
    }

    /// Listing restricted to an exact tag match (case-sensitive)
    pub async fn list_by_tag(&self, tag: &str, page: i64, page_size: i64) -> Result<Page> {
        self.search(&[], Some(tag), page, page_size).await
    }

    /// Keyword search with optional tag filter.
    ///
    /// A record matches when, for every keyword, at least one of
    /// {title, authors, abstract, id} contains it as a case-insensitive
    /// substring. Empty keywords are dropped; with no keywords and no
    /// tag this degenerates to `list_page`.
    pub async fn search(
        &self,
        keywords: &[String],
        tag: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Page> {
        let p = pagination::sanitize(page, page_size);
        let (where_sql, binds) = build_filter(keywords, tag);

        let count_sql = format!("SELECT COUNT(*) FROM papers{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let rows_sql = format!(
            "SELECT {} FROM papers{} ORDER BY date_added DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS, where_sql
        );
        let mut rows_query = sqlx::query_as::<_, PaperRow>(&rows_sql);
        for bind in &binds {
            rows_query = rows_query.bind(bind);
        }
        let rows = rows_query
            .bind(p.page_size)
            .bind(p.offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            total,
            page = p.page,
            page_size = p.page_size,
            "paper search"
        );

        Ok(Page {
            items: rows.into_iter().map(PaperRecord::from).collect(),
            total,
        })
    }

    /// Idempotent delete: removing a nonexistent id is not an error.
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM papers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_by_ids(&self, ids: &[String]) -> Result<u64> {
        let mut deleted = 0;
        for id in ids {
            deleted += self.delete_by_id(id).await?;
        }
        Ok(deleted)
    }

    /// Remove all records with an exact tag match; zero matches is success
    pub async fn delete_by_tag(&self, tag: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM papers WHERE tag = ?")
            .bind(tag)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Re-tag a record in place. Errors with NotFound for unknown ids.
    pub async fn set_tag(&self, id: &str, tag: &str) -> Result<PaperRecord> {
        let result = sqlx::query("UPDATE papers SET tag = ? WHERE id = ?")
            .bind(tag)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(crate::Error::NotFound(format!("paper {}", id)));
        }

        self.require(id).await
    }

    /// Attach a GitHub URL and/or local clone path to a record
    pub async fn set_github(
        &self,
        id: &str,
        github_url: Option<&str>,
        local_github_path: Option<&str>,
    ) -> Result<PaperRecord> {
        let result = sqlx::query(
            "UPDATE papers SET github_url = COALESCE(?, github_url), \
             local_github_path = COALESCE(?, local_github_path) WHERE id = ?",
        )
        .bind(github_url)
        .bind(local_github_path)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(crate::Error::NotFound(format!("paper {}", id)));
        }

        self.require(id).await
    }

    /// Remove every record. Returns the number of rows removed.
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM papers").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM papers")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn require(&self, id: &str) -> Result<PaperRecord> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::Error::NotFound(format!("paper {}", id)))
    }
}

/// Compile keyword/tag conditions into a WHERE clause and its bind list.
///
/// Keywords are matched with LIKE against each of the four searchable
/// fields; `%`/`_` inside a keyword are escaped so they match literally.
/// SQLite's default ASCII-case-insensitive LIKE supplies case folding.
fn build_filter(keywords: &[String], tag: Option<&str>) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        let pattern = format!("%{}%", escape_like(keyword));
        conditions.push(
            "(title LIKE ? ESCAPE '\\' OR authors LIKE ? ESCAPE '\\' \
             OR abstract LIKE ? ESCAPE '\\' OR id LIKE ? ESCAPE '\\')"
                .to_string(),
        );
        for _ in 0..4 {
            binds.push(pattern.clone());
        }
    }

    if let Some(tag) = tag {
        conditions.push("tag = ?".to_string());
        binds.push(tag.to_string());
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), binds)
    }
}

fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
