//! `shelfview` — print the catalog view derived from a JSON product export.
//!
//! Usage: `shelfview <products.json> [search term]`
//!
//! Business rules, capping policy and sort order come from the
//! `SHELFVIEW_*` environment variables (see `shelfview_browser::config`).

use anyhow::Context;

use shelfview_browser::{Action, BrowserConfig, CatalogBrowser, JsonFileSource};

fn main() -> anyhow::Result<()> {
    shelfview_observability::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: shelfview <products.json> [search term]")?;
    let search = args.collect::<Vec<_>>().join(" ");

    let config = BrowserConfig::from_env().context("invalid SHELFVIEW_* configuration")?;
    let mut browser = CatalogBrowser::new(JsonFileSource::new(&path), config);

    for notice in browser.load() {
        tracing::warn!(title = %notice.title, message = %notice.message, "notice");
    }
    if let Some(error) = browser.state().error.clone() {
        anyhow::bail!(error);
    }
    if !search.is_empty() {
        browser.dispatch(Action::SearchChanged(search));
    }

    let view = browser.view();
    tracing::info!(rows = view.rows.len(), total_stock = view.total_stock, "view derived");
    println!(
        "{}",
        serde_json::to_string_pretty(&view).context("failed to render view")?
    );
    Ok(())
}
