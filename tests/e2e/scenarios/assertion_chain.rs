use crate::support::sandbox;
use anyhow::Result;
use uniweb_harness::{HarnessError, InitOptions, PageOptions, SectionOptions};

#[tokio::test]
async fn test_chain_passes_on_scaffolded_page() -> Result<()> {
    let mut sb = sandbox().await?;
    sb.init_project("p", InitOptions::single_site())
        .await?
        .add_page("home", PageOptions::default())
        .await?
        .add_section("hero", SectionOptions::page("home"))
        .await?
        .add_section("stats", SectionOptions::page("home").under("hero"))
        .await?;

    sb.assertions()
        .file_exists("pages/home/hero.md", "hero document")
        .file_not_exists("pages/home/footer.md", "no footer yet")
        .file_contains("pages/home/hero.md", "# Hero", "default heading")
        .file_not_contains("pages/home/hero.md", "TODO", "no placeholder text")
        .yaml_property("pages/home/page.yml", "title", "Home", "page title")
        .yaml_property("pages/home/page.yml", "sections.length", 1, "one group")
        .yaml_property("pages/home/page.yml", "sections.0.hero.0", "stats", "nested child")
        .yaml_property_absent("pages/home/page.yml", "sections.1", "no second top-level entry")
        .directory_structure("pages/home", &["page.yml", "hero.md", "stats.md"], "files")
        .section_in_manifest("home", None, "stats", "stats listed once")
        .custom(
            |dir| {
                if dir.join("package.json").is_file() {
                    Ok(())
                } else {
                    Err("package.json missing".to_string())
                }
            },
            "project root",
        )
        .verify()
        .await?;

    sb.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn test_chain_reports_first_failure() -> Result<()> {
    let mut sb = sandbox().await?;
    sb.init_project("p", InitOptions::single_site())
        .await?
        .add_page("home", PageOptions::default())
        .await?;

    let err = sb
        .assertions()
        .file_exists("pages/home/page.yml", "manifest present")
        .file_exists("pages/home/missing.md", "missing section")
        .yaml_property("pages/home/page.yml", "title", "Wrong", "title mismatch")
        .verify()
        .await
        .unwrap_err();

    match err {
        HarnessError::Assertion { message, detail } => {
            assert_eq!(message, "missing section");
            assert!(detail.contains("pages/home/missing.md"));
        }
        other => panic!("expected assertion failure, got {other}"),
    }

    sb.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn test_missing_yaml_property_fails() -> Result<()> {
    let mut sb = sandbox().await?;
    sb.init_project("p", InitOptions::single_site())
        .await?
        .add_page("home", PageOptions::default())
        .await?;

    let result = sb
        .assertions()
        .yaml_property("pages/home/page.yml", "meta.author", "nobody", "")
        .verify()
        .await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("meta.author"));

    sb.cleanup().await;
    Ok(())
}
