//! Template filters and tags used when rendering pages.
//!
//! Every helper is a plain function returning [`Markup`]; text arguments are
//! escaped by `maud`. [`TagLibrary`] maps tag names to those functions so the
//! renderer can look them up by name; the library is built once at startup and
//! shared through the application state.

use crate::errors::{Error, Result};
use chrono::{DateTime, Local, TimeZone, format::Item, format::StrftimeItems};
use maud::{Markup, html};
use rust_decimal::Decimal;
use std::{collections::HashMap, fmt::Write, str::FromStr};

/// Label used by the `currency` filter when none is configured
pub const DEFAULT_CURRENCY: &str = "тг.";

/// Renders an amount with two decimals followed by the currency label, in bold.
#[must_use]
pub fn currency(value: Decimal, name: &str) -> Markup {
    html! {
        strong { (format!("{:.2} {name}", value.round_dp(2))) }
    }
}

/// Keeps the first half of the text (by characters) and appends `...`.
#[must_use]
pub fn truncate_half(value: &str) -> Markup {
    let half = value.chars().count() / 2;
    let head: String = value.chars().take(half).collect();
    html! { (head) "..." }
}

#[must_use]
pub fn to_upper(value: &str) -> Markup {
    html! { (value.to_uppercase()) }
}

/// Joins the items with `sep` and appends the item count.
#[must_use]
pub fn lst<S: AsRef<str>>(sep: &str, items: &[S]) -> Markup {
    let joined = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(sep);
    html! {
        (joined) " (" strong { "Итого: " (items.len()) } ")"
    }
}

/// Like [`lst`], with every character of `value` as one item.
#[must_use]
pub fn string_to_list(sep: &str, value: &str) -> Markup {
    let chars: Vec<String> = value.chars().map(String::from).collect();
    lst(sep, &chars)
}

/// Renders the items as an unordered list.
#[must_use]
pub fn ulist<S: AsRef<str>>(items: &[S]) -> Markup {
    html! {
        ul {
            @for item in items {
                li { (item.as_ref()) }
            }
        }
    }
}

/// Renders `now` with a strftime-style format inside the entry-date heading.
///
/// # Errors
/// Returns [`Error::TagArguments`] if the format string is not valid.
pub fn current_datetime_at<Tz>(now: &DateTime<Tz>, format: &str) -> Result<Markup>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::TagArguments {
            name: "current_datetime".to_string(),
            message: format!("invalid format string '{format}'"),
        });
    }

    let mut rendered = String::new();
    write!(rendered, "{}", now.format_with_items(items.into_iter())).map_err(|_| {
        Error::TagArguments {
            name: "current_datetime".to_string(),
            message: format!("cannot format date with '{format}'"),
        }
    })?;

    Ok(html! {
        h2 { "Entry Date and Time: " strong { (rendered) } }
    })
}

/// [`current_datetime_at`] for the current local time.
pub fn current_datetime(format: &str) -> Result<Markup> {
    current_datetime_at(&Local::now(), format)
}

type TagFn = Box<dyn Fn(&[&str]) -> Result<Markup> + Send + Sync>;

/// Name-to-function registry of the template tags.
pub struct TagLibrary {
    tags: HashMap<&'static str, TagFn>,
}

fn check_arity(name: &str, args: &[&str], min: usize, max: Option<usize>) -> Result<()> {
    let too_many = max.is_some_and(|max| args.len() > max);
    if args.len() < min || too_many {
        let expected = match max {
            Some(max) if max == min => format!("{min}"),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        return Err(Error::TagArguments {
            name: name.to_string(),
            message: format!("expected {expected} arguments, got {}", args.len()),
        });
    }
    Ok(())
}

impl TagLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Registers (or replaces) a tag under `name`.
    pub fn register<F>(&mut self, name: &'static str, tag: F) -> &mut Self
    where
        F: Fn(&[&str]) -> Result<Markup> + Send + Sync + 'static,
    {
        self.tags.insert(name, Box::new(tag));
        self
    }

    /// Builds the library with every built-in filter and tag. `currency_name`
    /// is the label the `currency` filter uses when called with one argument.
    #[must_use]
    pub fn standard(currency_name: &str) -> Self {
        let mut library = Self::new();
        let default_currency = currency_name.to_string();

        library
            .register("currency", move |args| {
                check_arity("currency", args, 1, Some(2))?;
                let value = Decimal::from_str(args[0].trim()).map_err(|e| Error::TagArguments {
                    name: "currency".to_string(),
                    message: format!("'{}' is not a number: {e}", args[0]),
                })?;
                let name = args.get(1).copied().unwrap_or(default_currency.as_str());
                Ok(currency(value, name))
            })
            .register("truncate_half", |args| {
                check_arity("truncate_half", args, 1, Some(1))?;
                Ok(truncate_half(args[0]))
            })
            .register("to_upper", |args| {
                check_arity("to_upper", args, 1, Some(1))?;
                Ok(to_upper(args[0]))
            })
            .register("lst", |args| {
                check_arity("lst", args, 1, None)?;
                Ok(lst(args[0], &args[1..]))
            })
            .register("string_to_list", |args| {
                check_arity("string_to_list", args, 2, Some(2))?;
                Ok(string_to_list(args[0], args[1]))
            })
            .register("ulist", |args| Ok(ulist(args)))
            .register("current_datetime", |args| {
                check_arity("current_datetime", args, 1, Some(1))?;
                current_datetime(args[0])
            });

        library
    }

    /// Runs the tag registered under `name`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownTag`] for an unregistered name, or whatever the
    /// tag itself reports for bad arguments.
    pub fn call(&self, name: &str, args: &[&str]) -> Result<Markup> {
        let tag = self.tags.get(name).ok_or_else(|| Error::UnknownTag {
            name: name.to_string(),
        })?;
        tag(args)
    }

    /// Registered tag names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tags.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for TagLibrary {
    fn default() -> Self {
        Self::standard(DEFAULT_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_currency_filter() {
        assert_eq!(
            currency(Decimal::from(1500), DEFAULT_CURRENCY).into_string(),
            "<strong>1500.00 тг.</strong>"
        );
        assert_eq!(
            currency(Decimal::new(125, 1), "USD").into_string(),
            "<strong>12.50 USD</strong>"
        );
        assert_eq!(
            currency(Decimal::ONE, "<b>").into_string(),
            "<strong>1.00 &lt;b&gt;</strong>"
        );
    }

    #[test]
    fn test_truncate_half_counts_characters() {
        assert_eq!(truncate_half("abcdef").into_string(), "abc...");
        assert_eq!(truncate_half("abcde").into_string(), "ab...");
        assert_eq!(truncate_half("привет").into_string(), "при...");
        assert_eq!(truncate_half("").into_string(), "...");
        assert_eq!(truncate_half("<a><b>").into_string(), "&lt;a&gt;...");
    }

    #[test]
    fn test_list_tags() {
        assert_eq!(
            lst(", ", &["a", "b", "c"]).into_string(),
            "a, b, c (<strong>Итого: 3</strong>)"
        );
        assert_eq!(
            string_to_list("-", "xyz").into_string(),
            "x-y-z (<strong>Итого: 3</strong>)"
        );
        assert_eq!(
            ulist(&["one", "<two>"]).into_string(),
            "<ul><li>one</li><li>&lt;two&gt;</li></ul>"
        );
        assert_eq!(
            lst::<&str>("|", &[]).into_string(),
            " (<strong>Итого: 0</strong>)"
        );
    }

    #[test]
    fn test_current_datetime_at() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
            .and_utc();
        assert_eq!(
            current_datetime_at(&now, "%d.%m.%Y %H:%M")
                .unwrap()
                .into_string(),
            "<h2>Entry Date and Time: <strong>09.03.2024 14:05</strong></h2>"
        );
        assert!(matches!(
            current_datetime_at(&Utc::now(), "%Q"),
            Err(Error::TagArguments { .. })
        ));
    }

    #[test]
    fn test_library_dispatches_by_name() {
        let library = TagLibrary::standard("EUR");

        let call = |name: &str, args: &[&str]| library.call(name, args).unwrap().into_string();

        assert_eq!(call("currency", &["3"]), "<strong>3.00 EUR</strong>");
        assert_eq!(call("currency", &["3", "USD"]), "<strong>3.00 USD</strong>");
        assert_eq!(call("to_upper", &["abc"]), "ABC");
        assert_eq!(call("lst", &["/", "x", "y"]), "x/y (<strong>Итого: 2</strong>)");
        assert_eq!(
            library.names(),
            vec![
                "currency",
                "current_datetime",
                "lst",
                "string_to_list",
                "to_upper",
                "truncate_half",
                "ulist"
            ]
        );
    }

    #[test]
    fn test_library_reports_bad_calls() {
        let library = TagLibrary::default();

        assert!(matches!(
            library.call("nope", &[]),
            Err(Error::UnknownTag { name }) if name == "nope"
        ));
        assert!(matches!(
            library.call("currency", &["ten"]),
            Err(Error::TagArguments { .. })
        ));
        assert!(matches!(
            library.call("to_upper", &[]),
            Err(Error::TagArguments { .. })
        ));
    }

    #[test]
    fn test_register_custom_tag() {
        let mut library = TagLibrary::new();
        library.register("shout", |args| Ok(html! { (args.join(" ")) "!" }));
        assert_eq!(
            library.call("shout", &["hey", "you"]).unwrap().into_string(),
            "hey you!"
        );
    }
}
