//! Address-bar state: which view is shown and which document it refers to.
//!
//! The chat view carries the source identifier in its query string (`/chat?sourceId=…`) so a
//! conversation can be resumed from the address alone.

use pdfchat_types::SourceId;

pub const HOME_PATH: &str = "/";
pub const CHAT_PATH: &str = "/chat";
pub const SOURCE_ID_PARAM: &str = "sourceId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Upload dropzone.
    Home,
    /// Conversation view, optionally bound to a document.
    Chat { source_id: Option<SourceId> },
}

impl View {
    /// Parse a path with optional query string, e.g. `/chat?sourceId=src_1`.
    ///
    /// Unknown paths fall back to [`View::Home`]. An empty `sourceId` is treated as absent.
    pub fn parse(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };

        if path.trim_end_matches('/') != CHAT_PATH {
            return View::Home;
        }

        let source_id = query
            .and_then(|q| query_param(q, SOURCE_ID_PARAM))
            .and_then(|v| SourceId::new(v).ok());
        View::Chat { source_id }
    }

    /// Render the view back into an address.
    pub fn to_location(&self) -> String {
        match self {
            View::Home => HOME_PATH.to_string(),
            View::Chat { source_id: None } => CHAT_PATH.to_string(),
            View::Chat {
                source_id: Some(id),
            } => format!(
                "{}?{}={}",
                CHAT_PATH,
                SOURCE_ID_PARAM,
                urlencoding::encode(id.as_str())
            ),
        }
    }

    pub fn source_id(&self) -> Option<&SourceId> {
        match self {
            View::Chat { source_id } => source_id.as_ref(),
            View::Home => None,
        }
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_location_round_trips_through_encoding() {
        let view = View::Chat {
            source_id: Some(SourceId::new("src a&b=c").unwrap()),
        };
        let location = view.to_location();
        assert_eq!(location, "/chat?sourceId=src%20a%26b%3Dc");
        assert_eq!(View::parse(&location), view);
    }

    #[test]
    fn parse_picks_source_id_among_other_params() {
        let view = View::parse("/chat?page=2&sourceId=src_42");
        assert_eq!(view.source_id().map(SourceId::as_str), Some("src_42"));
    }

    #[test]
    fn missing_or_empty_source_id_is_absent() {
        assert_eq!(View::parse("/chat"), View::Chat { source_id: None });
        assert_eq!(View::parse("/chat?sourceId="), View::Chat { source_id: None });
    }

    #[test]
    fn other_paths_are_home() {
        assert_eq!(View::parse("/"), View::Home);
        assert_eq!(View::parse("/pricing?sourceId=x"), View::Home);
        assert_eq!(View::Home.to_location(), "/");
    }
}
