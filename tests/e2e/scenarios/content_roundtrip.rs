use crate::support::sandbox;
use anyhow::Result;
use uniweb_harness::{ContentBuilder, InitOptions, PageOptions, SectionOptions, SetSectionOptions};

#[tokio::test]
async fn test_built_document_survives_set_section() -> Result<()> {
    let mut sb = sandbox().await?;
    let document = ContentBuilder::new()
        .component("Hero")
        .param("theme", "dark")
        .param("columns", 2)
        .title("Welcome")
        .heading(2, "Why us")
        .paragraph("Fast, small and friendly.")
        .list(&["One", "Two"])
        .image("/img/cover.png", "Cover")
        .link("Start", "/start", &[("role", "button")])
        .code("sh", "npm run dev")
        .build();

    sb.init_project("p", InitOptions::single_site())
        .await?
        .add_page("home", PageOptions::default())
        .await?
        .add_section("hero", SectionOptions::page("home"))
        .await?
        .set_section("hero", &document, SetSectionOptions::page("home"))
        .await?;

    let written = sb.read_file("pages/home/hero.md").await?;
    for line in document.lines().filter(|l| !l.trim().is_empty()) {
        assert!(written.contains(line), "missing line {:?}", line);
    }
    for key in ["component:", "theme:", "columns:"] {
        assert!(written.contains(key), "missing front matter key {}", key);
    }
    assert!(written.starts_with("---\ncomponent: Hero\n"));

    sb.cleanup().await;
    Ok(())
}
