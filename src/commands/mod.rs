pub mod catalog;
pub mod favorites;
pub mod state;

use std::path::PathBuf;

use pico_args::Arguments;
use serde_json::Value;

use crate::libs::error::{AnyResult, PetflixError};

pub use state::AppState;

pub const USAGE: &str = "\
Usage: petflix [--config <path>] <command>

Commands:
  home                             landing view (featured, trending, reptiles, sloths)
  list                             every video
  featured                         featured videos
  trending [--limit <n>]           most viewed videos
  category <name> [--slow]         videos of a category (\"all\" for every video)
  search [<query>...]              search titles, descriptions and channels
  show <id>                        a single video
  categories                       known categories
  favorites                        favorited videos
  favorite add|remove|toggle <id>  update favorites
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    List,
    Featured,
    Trending { limit: Option<usize> },
    Category { name: String, slow: bool },
    Search { query: String },
    Show { id: String },
    Categories,
    Favorites,
    Favorite { action: FavoriteAction, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

/**
 * Parse the command line. Options may appear anywhere, the remaining free
 * arguments name the command and its operands.
 */
pub fn parse(mut args: Arguments) -> AnyResult<Invocation> {
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let limit: Option<usize> = args.opt_value_from_str("--limit")?;
    let slow = args.contains("--slow");

    let mut free = Vec::new();
    for arg in args.finish() {
        let arg = arg
            .into_string()
            .map_err(|arg| PetflixError::InvalidArguments(format!("not valid unicode: {:?}", arg)))?;
        if arg.starts_with("--") {
            return Err(PetflixError::InvalidArguments(format!("unknown option {}", arg)));
        }
        free.push(arg);
    }

    let mut free = free.into_iter();
    let name = free
        .next()
        .ok_or_else(|| PetflixError::InvalidArguments("missing command".into()))?;

    let command = match name.as_str() {
        "home" => Command::Home,
        "list" => Command::List,
        "featured" => Command::Featured,
        "trending" => Command::Trending { limit },
        "category" => Command::Category {
            name: operand(&mut free, &name, "a category")?,
            slow,
        },
        "show" => Command::Show {
            id: operand(&mut free, &name, "a video id")?,
        },
        "categories" => Command::Categories,
        "favorites" => Command::Favorites,
        "favorite" => {
            let action = match operand(&mut free, &name, "add, remove or toggle")?.as_str() {
                "add" => FavoriteAction::Add,
                "remove" => FavoriteAction::Remove,
                "toggle" => FavoriteAction::Toggle,
                other => {
                    return Err(PetflixError::InvalidArguments(format!(
                        "unknown favorite action {}",
                        other
                    )))
                }
            };
            Command::Favorite {
                action,
                id: operand(&mut free, &name, "a video id")?,
            }
        }
        "search" => Command::Search {
            query: free.collect::<Vec<_>>().join(" "),
        },
        other => {
            return Err(PetflixError::InvalidArguments(format!(
                "unknown command {}",
                other
            )))
        }
    };

    if limit.is_some() && !matches!(command, Command::Trending { .. }) {
        return Err(PetflixError::InvalidArguments(
            "--limit only applies to trending".into(),
        ));
    }
    if slow && !matches!(command, Command::Category { .. }) {
        return Err(PetflixError::InvalidArguments(
            "--slow only applies to category".into(),
        ));
    }

    Ok(Invocation {
        config_path,
        command,
    })
}

fn operand(free: &mut impl Iterator<Item = String>, command: &str, what: &str) -> AnyResult<String> {
    free.next()
        .ok_or_else(|| PetflixError::InvalidArguments(format!("{} expects {}", command, what)))
}

/// Run a command, returning its JSON output
pub async fn run(state: &AppState, command: Command) -> AnyResult<Value> {
    let output = match command {
        Command::Home => serde_json::to_value(catalog::home(state).await?)?,
        Command::List => serde_json::to_value(catalog::list(state).await?)?,
        Command::Featured => serde_json::to_value(catalog::featured(state).await?)?,
        Command::Trending { limit } => serde_json::to_value(catalog::trending(state, limit).await?)?,
        Command::Category { name, slow } => {
            serde_json::to_value(catalog::category(state, &name, slow).await?)?
        }
        Command::Search { query } => serde_json::to_value(catalog::search(state, &query).await?)?,
        Command::Show { id } => serde_json::to_value(catalog::show(state, &id).await?)?,
        Command::Categories => serde_json::to_value(catalog::categories())?,
        Command::Favorites => serde_json::to_value(favorites::list(state).await?)?,
        Command::Favorite { action, id } => {
            let status = match action {
                FavoriteAction::Add => favorites::add(state, &id),
                FavoriteAction::Remove => favorites::remove(state, &id),
                FavoriteAction::Toggle => favorites::toggle(state, &id),
            };
            serde_json::to_value(status)?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::libs::catalog::VideoCatalog;
    use crate::libs::favorites::FavoritesStore;
    use crate::libs::source::{parse_collection, MemorySource, VideoSource};
    use crate::libs::storage::MemoryStorage;
    use crate::libs::video::tests::video;
    use crate::libs::video::Video;
    use async_trait::async_trait;
    use tokio::time::Instant;

    struct BrokenSource;

    #[async_trait]
    impl VideoSource for BrokenSource {
        async fn load(&self) -> AnyResult<Vec<Video>> {
            parse_collection("{ not json")
        }
    }

    fn args(line: &str) -> Arguments {
        Arguments::from_vec(line.split_whitespace().map(OsString::from).collect())
    }

    fn state_with(source: Arc<dyn VideoSource>) -> AppState {
        AppState::new(
            VideoCatalog::new(source),
            FavoritesStore::new(Arc::new(MemoryStorage::new())),
            2,
        )
    }

    fn state() -> AppState {
        let mut dog = video("1", "dogs", true);
        dog.views = "2M views".into();
        let mut cat = video("2", "cats", false);
        cat.views = "5M views".into();
        let lizard = video("3", "reptiles", false);
        let sloth = video("4", "sloths", true);
        state_with(Arc::new(MemorySource::new(vec![dog, cat, lizard, sloth])))
    }

    fn ids(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .expect("expected a list")
            .iter()
            .map(|entry| entry["id"].as_str().expect("expected an id"))
            .collect()
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse(args("list")).unwrap().command, Command::List);
        assert_eq!(parse(args("home")).unwrap().command, Command::Home);
        assert_eq!(parse(args("favorites")).unwrap().command, Command::Favorites);
    }

    #[test]
    fn parses_options_anywhere() {
        let invocation = parse(args("--config /tmp/petflix.toml category sloths --slow")).unwrap();
        assert_eq!(invocation.config_path, Some(PathBuf::from("/tmp/petflix.toml")));
        assert_eq!(
            invocation.command,
            Command::Category {
                name: "sloths".into(),
                slow: true
            }
        );

        assert_eq!(
            parse(args("trending --limit 3")).unwrap().command,
            Command::Trending { limit: Some(3) }
        );
    }

    #[test]
    fn search_joins_words_and_allows_empty_query() {
        assert_eq!(
            parse(args("search happy dog")).unwrap().command,
            Command::Search {
                query: "happy dog".into()
            }
        );
        assert_eq!(
            parse(args("search")).unwrap().command,
            Command::Search { query: "".into() }
        );
    }

    #[test]
    fn parses_favorite_actions() {
        assert_eq!(
            parse(args("favorite toggle 7")).unwrap().command,
            Command::Favorite {
                action: FavoriteAction::Toggle,
                id: "7".into()
            }
        );
    }

    #[test]
    fn rejects_bad_invocations() {
        for line in [
            "",
            "dance",
            "show",
            "favorite like 1",
            "list --bogus",
            "trending --limit x",
            "list --limit 3",
            "category dogs --limit 2",
            "search dog --slow",
            "trending --slow",
        ] {
            assert!(
                matches!(parse(args(line)), Err(PetflixError::InvalidArguments(_))),
                "{:?} should be rejected",
                line
            );
        }
    }

    #[tokio::test]
    async fn results_carry_favorite_flags() {
        let state = state();
        run(&state, Command::Favorite { action: FavoriteAction::Add, id: "2".into() })
            .await
            .unwrap();

        let output = run(&state, Command::List).await.unwrap();
        let flags: Vec<bool> = output
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["favorited"].as_bool().unwrap())
            .collect();

        assert_eq!(flags, [false, true, false, false]);
        assert_eq!(output[0]["uploadTime"], "1 day ago");
    }

    #[tokio::test]
    async fn trending_uses_configured_limit() {
        let state = state();
        let output = run(&state, Command::Trending { limit: None }).await.unwrap();
        assert_eq!(ids(&output), ["2", "1"]);

        let output = run(&state, Command::Trending { limit: Some(1) }).await.unwrap();
        assert_eq!(ids(&output), ["2"]);
    }

    #[tokio::test]
    async fn favorites_skip_missing_videos() {
        let state = state();
        for id in ["4", "deleted", "1"] {
            favorites::add(&state, id);
        }

        let output = run(&state, Command::Favorites).await.unwrap();
        assert_eq!(ids(&output), ["1", "4"]);
    }

    #[tokio::test]
    async fn favorite_commands_report_status() {
        let state = state();
        let added = favorites::add(&state, "1");
        assert!(added.favorited);
        assert!(!favorites::toggle(&state, "1").favorited);
        assert!(favorites::toggle(&state, "1").favorited);
        assert!(!favorites::remove(&state, "1").favorited);
    }

    #[tokio::test]
    async fn show_reports_unknown_videos() {
        let state = state();
        let output = run(&state, Command::Show { id: "3".into() }).await.unwrap();
        assert_eq!(output["id"], "3");
        assert_eq!(output["favorited"], false);

        let missing = run(&state, Command::Show { id: "99".into() }).await;
        assert!(matches!(missing, Err(PetflixError::VideoNotFound(id)) if id == "99"));
    }

    #[tokio::test(start_paused = true)]
    async fn home_gathers_every_section() {
        let state = state();
        let start = Instant::now();

        let output = run(&state, Command::Home).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(3500));
        assert_eq!(ids(&output["featured"]), ["1", "4"]);
        assert_eq!(ids(&output["trending"]), ["2", "1"]);
        assert_eq!(ids(&output["reptiles"]), ["3"]);
        assert_eq!(ids(&output["sloths"]), ["4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_data_renders_empty_views() {
        let state = state_with(Arc::new(BrokenSource));

        assert_eq!(run(&state, Command::List).await.unwrap(), Value::Array(vec![]));
        assert_eq!(
            run(&state, Command::Search { query: "dog".into() }).await.unwrap(),
            Value::Array(vec![])
        );

        let home = run(&state, Command::Home).await.unwrap();
        assert_eq!(home["featured"], Value::Array(vec![]));
        assert_eq!(home["sloths"], Value::Array(vec![]));

        let show = run(&state, Command::Show { id: "1".into() }).await;
        assert!(matches!(show, Err(PetflixError::DataUnavailable(_))));
    }

    #[test]
    fn lists_known_categories() {
        let categories = catalog::categories();
        assert_eq!(categories.first().map(String::as_str), Some("all"));
        assert!(categories.iter().any(|category| category == "sloths"));
        assert!(categories.iter().any(|category| category == "reptiles"));
    }
}
