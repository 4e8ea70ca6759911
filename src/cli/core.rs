use crate::cli;
use servicetag_edl::{resolve_url_base, Config, Environment, TagFilter};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the run configuration from CLI arguments and the environment
--------------------------------------------------------------------------------------*/

pub fn build_config(args: &cli::Args, env: &Environment) -> Config {
    let filter = TagFilter::default()
        .include(args.include_tags.iter().flatten())
        .exclude(args.exclude_tags.iter().flatten());

    let mut config = Config::new(&args.output_dir)
        .filter(filter)
        .url_base(&resolve_url_base(args.url_base.as_deref(), env));

    if let Some(path) = &args.save_json {
        config = config.save_json(path);
    }
    if let Some(path) = &args.source_json {
        config = config.source_json(path);
    }
    if let Some(path) = &args.url_index {
        config = config.url_index(path);
    }

    config
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn parse(args: &[&str]) -> cli::Args {
        cli::Args::try_parse_from(std::iter::once("servicetag-edl").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&parse(&["edl"]), &Environment::default());

        assert_eq!(config.output_dir(), Path::new("edl"));
        assert_eq!(config.tag_filter(), &TagFilter::default());
        assert!(config.save_json_path().is_none());
        assert!(config.url_index_path().is_none());
        assert_eq!(
            config.url_base_str(),
            "https://raw.githubusercontent.com/netaryx/palo-alto-azure-servicetag-edl/main"
        );
    }

    #[test]
    fn test_build_config_filter_and_paths() {
        let args = parse(&[
            "edl",
            "--include-tags",
            "A",
            "B",
            "--exclude-tags",
            "B",
            "--source-json",
            "raw.json",
            "--url-index",
            "index.csv",
        ]);

        let config = build_config(&args, &Environment::default());

        assert!(config.tag_filter().allows("A"));
        assert!(!config.tag_filter().allows("B"));
        assert!(!config.tag_filter().allows("C"));
        assert_eq!(config.source_json_path(), Some(Path::new("raw.json")));
        assert_eq!(config.url_index_path(), Some(Path::new("index.csv")));
    }

    #[test]
    fn test_build_config_url_base_precedence() {
        let env: Environment = [
            ("GITHUB_REPOSITORY", "acme/edl"),
            ("GITHUB_REF_NAME", "main"),
        ]
        .into_iter()
        .collect();

        let config = build_config(&parse(&["edl"]), &env);
        assert_eq!(
            config.url_base_str(),
            "https://raw.githubusercontent.com/acme/edl/main"
        );

        let config = build_config(&parse(&["edl", "--url-base", "https://x.test"]), &env);
        assert_eq!(config.url_base_str(), "https://x.test");
    }
}
