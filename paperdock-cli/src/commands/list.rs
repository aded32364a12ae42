//! `paperdock list` - tabular listing with search, tag filter and paging

use paperdock_common::db::PaperStore;

/// Width the title column is truncated to
const TITLE_WIDTH: usize = 60;

pub async fn run(
    store: &PaperStore,
    keywords: &[String],
    tag: Option<&str>,
    page: i64,
    page_size: i64,
) -> anyhow::Result<()> {
    let result = store.search(keywords, tag, page, page_size).await?;

    if result.items.is_empty() {
        if result.total == 0 {
            println!("No papers found.");
        } else {
            println!("No papers on page {} ({} total).", page, result.total);
        }
        return Ok(());
    }

    println!(
        "{:<14} {:<width$} {:<12} {}",
        "ID",
        "TITLE",
        "TAG",
        "ADDED",
        width = TITLE_WIDTH
    );
    for record in &result.items {
        println!(
            "{:<14} {:<width$} {:<12} {}",
            record.id,
            truncate(&record.title, TITLE_WIDTH),
            record.tag,
            record.date_added,
            width = TITLE_WIDTH
        );
        if !record.authors.is_empty() {
            println!(
                "{:<14} {}",
                "",
                truncate(&record.authors.join(", "), TITLE_WIDTH)
            );
        }
    }

    let page_size = page_size.max(1);
    let total_pages = (result.total + page_size - 1) / page_size;
    println!(
        "\nPage {} of {} ({} paper{})",
        page,
        total_pages.max(1),
        result.total,
        if result.total == 1 { "" } else { "s" }
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_cuts_long_strings_with_ellipsis() {
        let out = truncate("a very long paper title indeed", 10);
        assert_eq!(out, "a very ...");
        assert_eq!(out.chars().count(), 10);
    }
}
