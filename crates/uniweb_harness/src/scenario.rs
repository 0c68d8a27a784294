//! Named multi-step project scaffolds built from the fluent operations.

use crate::content::ContentBuilder;
use crate::error::Result;
use crate::options::{InitOptions, LocaleOptions, PageOptions, SectionOptions, SetSectionOptions};
use crate::sandbox::Sandbox;

/// Builds ready-made projects inside a sandbox. Each scaffold leaves the
/// cursor inside the new project and returns the sandbox.
pub struct ScenarioBuilder<'a> {
    sandbox: &'a mut Sandbox,
}

impl<'a> ScenarioBuilder<'a> {
    pub fn new(sandbox: &'a mut Sandbox) -> Self {
        Self { sandbox }
    }

    /// Single site with home, about, projects and contact pages.
    pub async fn portfolio(self, name: &str) -> Result<&'a mut Sandbox> {
        let sandbox = self.sandbox;
        sandbox.init_project(name, InitOptions::single_site()).await?;

        let hero = ContentBuilder::new()
            .component("Hero")
            .title("Jane Doe")
            .paragraph("Designer and developer.");
        let bio = ContentBuilder::new()
            .title("About Me")
            .paragraph("Ten years of shipping products.")
            .list(&["Design", "Frontend", "Research"]);

        sandbox
            .batch()
            .add_page("home", PageOptions::default())
            .add_page("about", PageOptions::default())
            .add_page("projects", PageOptions::default())
            .add_page("contact", PageOptions::default())
            .add_section("hero", SectionOptions::page("home"))
            .add_section("bio", SectionOptions::page("about"))
            .add_section("gallery", SectionOptions::page("projects"))
            .add_section("form", SectionOptions::page("contact"))
            .set_section("hero", hero.build(), SetSectionOptions::page("home"))
            .set_section("bio", bio.build(), SetSectionOptions::page("about"))
            .execute()
            .await
    }

    /// Single site with a post index whose featured post is nested under it.
    pub async fn blog(self, name: &str) -> Result<&'a mut Sandbox> {
        let sandbox = self.sandbox;
        sandbox.init_project(name, InitOptions::single_site()).await?;

        let posts = ContentBuilder::new()
            .component("PostList")
            .param("limit", 10)
            .title("Latest Posts");

        sandbox
            .batch()
            .add_page("home", PageOptions::default())
            .add_page("blog", PageOptions::default())
            .add_page("about", PageOptions::default())
            .add_section("hero", SectionOptions::page("home"))
            .add_section("posts", SectionOptions::page("blog"))
            .add_section("featured", SectionOptions::page("blog").under("posts"))
            .add_section("bio", SectionOptions::page("about"))
            .set_section("posts", posts.build(), SetSectionOptions::page("blog"))
            .execute()
            .await
    }

    /// Single site with a catalog (filters nested under it), cart and checkout.
    pub async fn ecommerce(self, name: &str) -> Result<&'a mut Sandbox> {
        let sandbox = self.sandbox;
        sandbox
            .init_project(name, InitOptions::single_site().module("foundation"))
            .await?;

        let catalog = ContentBuilder::new()
            .component("ProductGrid")
            .param("columns", 3)
            .title("Shop")
            .link("View cart", "/cart", &[("role", "button")]);

        sandbox
            .batch()
            .add_page("home", PageOptions::default())
            .add_page("products", PageOptions::default())
            .add_page("cart", PageOptions::default())
            .add_page("checkout", PageOptions::default())
            .add_section("hero", SectionOptions::page("home"))
            .add_section("catalog", SectionOptions::page("products"))
            .add_section("filters", SectionOptions::page("products").under("catalog"))
            .add_section("summary", SectionOptions::page("cart"))
            .add_section("payment", SectionOptions::page("checkout"))
            .set_section("catalog", catalog.build(), SetSectionOptions::page("products"))
            .execute()
            .await
    }

    /// Single site whose home hero is translated into each of `locales`.
    pub async fn multilingual(self, name: &str, locales: &[&str]) -> Result<&'a mut Sandbox> {
        let sandbox = self.sandbox;
        sandbox
            .init_project(name, InitOptions::single_site())
            .await?
            .add_page("home", PageOptions::default())
            .await?
            .add_section("hero", SectionOptions::page("home"))
            .await?
            .set_section(
                "hero",
                &ContentBuilder::new().title("Welcome").build(),
                SetSectionOptions::page("home"),
            )
            .await?;

        if locales.is_empty() {
            return Ok(sandbox);
        }
        sandbox.add_locale(locales, LocaleOptions::default()).await?;

        let mut batch = sandbox.batch();
        for locale in locales {
            let content = ContentBuilder::new()
                .title(&format!("Welcome ({})", locale))
                .build();
            let options = SetSectionOptions::page("home").locale(*locale);
            batch = batch.set_section("hero", content, options);
        }
        batch.execute().await
    }

    /// Workspace whose first site has a home page with a hero section.
    pub async fn workspace(self, name: &str, site: &str) -> Result<&'a mut Sandbox> {
        let sandbox = self.sandbox;
        sandbox.init_project(name, InitOptions::workspace(site)).await?;

        sandbox
            .batch()
            .add_page("home", PageOptions::site(site))
            .add_section("hero", SectionOptions::page("home").in_site(site))
            .set_section(
                "hero",
                ContentBuilder::new().title(site).build(),
                SetSectionOptions::page("home").in_site(site),
            )
            .execute()
            .await
    }
}

impl Sandbox {
    /// Scaffold a named scenario in this sandbox.
    pub fn scenario(&mut self) -> ScenarioBuilder<'_> {
        ScenarioBuilder::new(self)
    }
}
