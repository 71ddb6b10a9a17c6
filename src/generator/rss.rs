//! RSS feed generation from a collection.

use crate::{config::SiteConfig, content::Collection, log};
use anyhow::{Result, anyhow};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::fs;

pub struct RssFeed {
    title: String,
    description: String,
    base_url: String,
    language: String,
    generator: String,
    items: Vec<rss::Item>,
}

impl RssFeed {
    /// Build a feed from a collection's entries. Entries without a
    /// parseable date are skipped (a pub date is required per item).
    pub fn new(config: &SiteConfig, collection: &Collection) -> Self {
        log!("rss"; "generating rss feed from `{}`", collection.name);

        let base_url = config.base_url().to_string();
        let author = format!("{} ({})", config.base.email, config.base.author);

        let items = collection
            .entries()
            .iter()
            .filter_map(|entry| {
                let date = entry.date?;
                let permalink = format!("{}/{}/{}/", base_url, collection.name, entry.slug);
                let categories: Vec<_> = entry
                    .tag_labels()
                    .into_iter()
                    .map(|label| CategoryBuilder::default().name(label).build())
                    .collect();

                Some(
                    ItemBuilder::default()
                        .title(entry.title.clone())
                        .link(permalink.clone())
                        .guid(
                            GuidBuilder::default()
                                .permalink(true)
                                .value(permalink)
                                .build(),
                        )
                        .description(entry.description.clone())
                        .pub_date(date.to_rfc2822())
                        .author(author.clone())
                        .categories(categories)
                        .build(),
                )
            })
            .collect();

        Self {
            title: config.base.title.clone(),
            description: config.base.description.clone(),
            base_url,
            language: config.base.language.clone(),
            generator: "hazel".to_string(),
            items,
        }
    }

    fn into_rss_xml(self) -> Result<String> {
        let channel = ChannelBuilder::default()
            .title(self.title)
            .link(self.base_url)
            .description(self.description)
            .language(self.language)
            .generator(self.generator)
            .items(self.items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validate: {e}"))?;

        Ok(channel.to_string())
    }

    pub fn write_to_file(self, config: &SiteConfig) -> Result<()> {
        let xml = self.into_rss_xml()?;
        let rss_path = config.build.output.join(&config.build.rss.path);
        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(rss_path, xml)?;

        log!("rss"; "rss feed written successfully");
        Ok(())
    }
}
