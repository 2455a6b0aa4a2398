//! CLI command implementations.

pub mod auth;
pub mod browse;
pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

use anyhow::Result;
use catalog_core::{parse_price_input, ListingQuery, SortKey, ValidationErrors};
use clap::{Args, Subcommand};

use crate::output::Output;

/// Filters shared by `list` and `browse`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Search text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Sort order: price_asc, price_desc, name_asc, name_desc or none.
    #[arg(long)]
    pub sort: Option<SortKey>,
}

impl FilterArgs {
    /// Build the first-page query these filters describe.
    pub fn to_query(&self) -> Result<ListingQuery> {
        let mut query = ListingQuery::new();
        if let Some(ref search) = self.search {
            query.set_search_text(search.clone());
        }
        if let Some(ref min) = self.min_price {
            query.set_min_price(parse_price_input(min)?);
        }
        if let Some(ref max) = self.max_price {
            query.set_max_price(parse_price_input(max)?);
        }
        if let Some(sort) = self.sort {
            query.set_sort(sort);
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.sort.is_none()
    }
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Product price.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Product image URL.
    #[arg(short, long)]
    pub image: Option<String>,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Product ID.
    pub id: String,

    /// New name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// New price.
    #[arg(short, long)]
    pub price: Option<String>,

    /// New image URL.
    #[arg(short, long)]
    pub image: Option<String>,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Product ID.
    pub id: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    /// Username.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Account email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Print each field error on its own line.
pub(crate) fn report_validation(output: &Output, errors: &ValidationErrors) {
    for error in errors.iter() {
        output.error(&format!("{}: {}", error.field, error.message));
    }
}

/// Use `value` if given, otherwise prompt for it.
pub(crate) fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Use `value` if given, otherwise prompt without echo.
pub(crate) fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_to_query() {
        let filters = FilterArgs {
            search: Some("lamp".to_string()),
            min_price: Some("".to_string()),
            max_price: Some("900".to_string()),
            sort: Some(SortKey::PriceDesc),
        };
        let query = filters.to_query().unwrap();
        assert_eq!(query.search_text, "lamp");
        assert_eq!(query.min_price, None);
        assert_eq!(query.max_price, Some(900.0));
        assert_eq!(query.sort, SortKey::PriceDesc);
        assert_eq!(query.page, 1);
        assert!(!filters.is_empty());
        assert!(FilterArgs::default().is_empty());
    }

    #[test]
    fn test_bad_price_filter() {
        let filters = FilterArgs {
            min_price: Some("cheap".to_string()),
            ..FilterArgs::default()
        };
        assert!(filters.to_query().is_err());
    }
}
