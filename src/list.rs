//! Listing the files, messages and services of a loaded schema.

use std::io::Write;

use log::warn;

use crate::{Error, Result, Schema};

/// A kind of descriptor that can be listed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Files,
    Messages,
    Services,
}

impl Category {
    /// Parses a category keyword, ignoring ASCII case.
    ///
    /// Recognized keywords are `file`/`files`, `msg`/`message`/`messages` and
    /// `svc`/`services`.
    pub fn from_keyword(keyword: &str) -> Option<Category> {
        match keyword.to_ascii_lowercase().as_str() {
            "file" | "files" => Some(Category::Files),
            "msg" | "message" | "messages" => Some(Category::Messages),
            "svc" | "services" => Some(Category::Services),
            _ => None,
        }
    }
}

/// Maps keywords to distinct categories, in the order they are first requested.
///
/// Unrecognized keywords are skipped. Fails with a usage error if `keywords`
/// is empty.
pub fn categories<I, S>(keywords: I) -> Result<Vec<Category>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut requested = false;
    let mut categories = Vec::new();
    for keyword in keywords {
        requested = true;
        match Category::from_keyword(keyword.as_ref()) {
            Some(category) if !categories.contains(&category) => categories.push(category),
            Some(_) => (),
            None => warn!("ignoring unknown descriptor type: {:?}", keyword.as_ref()),
        }
    }
    if !requested {
        return Err(Error::usage(
            r#"specify one of "files", "messages" or "services""#,
        ));
    }
    Ok(categories)
}

/// Writes one fully-qualified name per line for each category.
///
/// Files are written in load order. Messages and services are the top-level
/// declarations of each file, in declaration order, files visited in load order.
pub fn write_names<W>(schema: &Schema, categories: &[Category], mut out: W) -> Result<()>
where
    W: Write,
{
    for category in categories {
        for file in schema.files() {
            let written = match category {
                Category::Files => writeln!(out, "{}", file.name()),
                Category::Messages => file
                    .messages()
                    .try_for_each(|message| writeln!(out, "{}", message.full_name())),
                Category::Services => file
                    .services()
                    .try_for_each(|service| writeln!(out, "{}", service.full_name())),
            };
            written.map_err(Error::write)?;
        }
    }
    out.flush().map_err(Error::write)
}

/// Lists the descriptors named by `keywords` to `out`.
pub fn list<I, S, W>(schema: &Schema, keywords: I, out: W) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    let categories = categories(keywords)?;
    write_names(schema, &categories, out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_from_keyword() {
        assert_eq!(Category::from_keyword("FILES"), Some(Category::Files));
        assert_eq!(Category::from_keyword("file"), Some(Category::Files));
        assert_eq!(Category::from_keyword("Msg"), Some(Category::Messages));
        assert_eq!(Category::from_keyword("message"), Some(Category::Messages));
        assert_eq!(Category::from_keyword("messages"), Some(Category::Messages));
        assert_eq!(Category::from_keyword("svc"), Some(Category::Services));
        assert_eq!(Category::from_keyword("SERVICES"), Some(Category::Services));
        assert_eq!(Category::from_keyword("service"), None);
        assert_eq!(Category::from_keyword("enums"), None);
    }

    #[test]
    fn test_categories_dedup() {
        assert_eq!(
            categories(["msg", "services", "MESSAGES", "message", "svc"]).unwrap(),
            vec![Category::Messages, Category::Services]
        );
    }

    #[test]
    fn test_categories_unknown_ignored() {
        assert!(categories(["bogus"]).unwrap().is_empty());
        assert_eq!(
            categories(["bogus", "files"]).unwrap(),
            vec![Category::Files]
        );
    }

    #[test]
    fn test_categories_empty() {
        let error = categories(Vec::<String>::new()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Usage);
        let message = error.to_string();
        assert!(message.contains("files"));
        assert!(message.contains("messages"));
        assert!(message.contains("services"));
    }
}
