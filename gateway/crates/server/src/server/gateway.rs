use std::time::Duration;

use gateway_config::{CacheConfig, Config, Environment, UpstreamConfig};
use letterboxd_engine::{Engine, EngineOptions};
use letterboxd_upstream::{production_base_url, CacheSettings, ClientConfig, Credentials, Target, UpstreamClient};
use secrecy::SecretString;

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the engine, with its upstream client, from the configuration.
pub(super) fn generate(
    config: &Config,
    environment: Environment,
    api_key: SecretString,
    api_secret: SecretString,
) -> crate::Result<Engine> {
    let credentials = Credentials::new(api_key, api_secret)?;
    let upstream = UpstreamClient::new(client_config(&config.upstream, &config.cache, environment), credentials)?;

    let options = EngineOptions {
        introspection: config.graph.introspection,
    };

    Ok(Engine::new(upstream, options)?)
}

fn client_config(
    upstream: &UpstreamConfig,
    cache: &CacheConfig,
    environment: Environment,
) -> ClientConfig {
    let target = match environment {
        Environment::Production => {
            if upstream.development.accept_invalid_certs {
                tracing::warn!("`accept_invalid_certs` is ignored outside of the development environment");
            }

            Target::Production {
                base_url: upstream.base_url.clone().unwrap_or_else(production_base_url),
            }
        }
        Environment::Development => Target::Development {
            base_url: upstream.development.base_url.clone(),
            accept_invalid_certs: upstream.development.accept_invalid_certs,
        },
    };

    let cache = cache.enabled.then(|| CacheSettings {
        max_entries: cache.max_entries(),
        ttl: cache.ttl(),
    });

    ClientConfig {
        target,
        signature_base_url: upstream.signature_base_url.clone().unwrap_or_else(production_base_url),
        timeout: upstream.timeout.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT),
        cache,
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn config(input: &str) -> Config {
        toml::from_str(input).unwrap()
    }

    #[test]
    fn production_is_the_default() {
        let config = config("");

        let client = client_config(&config.upstream, &config.cache, config.upstream.environment);

        assert_eq!(Target::production(), client.target);
        assert_eq!(production_base_url(), client.signature_base_url);
        assert_eq!(Duration::from_secs(30), client.timeout);
        assert_eq!(None, client.cache);
    }

    #[test]
    fn certificates_are_only_relaxed_in_development() {
        let config = config(indoc! {r#"
            [upstream.development]
            base_url = "https://localhost:62917/api/v0"
            accept_invalid_certs = true
        "#});

        let client = client_config(&config.upstream, &config.cache, Environment::Production);
        assert_eq!(Target::production(), client.target);

        let client = client_config(&config.upstream, &config.cache, Environment::Development);
        assert_eq!(
            Target::Development {
                base_url: "https://localhost:62917/api/v0".parse().unwrap(),
                accept_invalid_certs: true,
            },
            client.target
        );
        assert_eq!(production_base_url(), client.signature_base_url);
    }

    #[test]
    fn development_defaults_to_the_local_proxy() {
        let config = config(indoc! {r#"
            [upstream]
            environment = "development"
        "#});

        let client = client_config(&config.upstream, &config.cache, config.upstream.environment);

        assert_eq!(
            Target::Development {
                base_url: "https://localhost:62917/api/v0".parse().unwrap(),
                accept_invalid_certs: false,
            },
            client.target
        );
        assert_eq!(production_base_url(), client.signature_base_url);
    }

    #[test]
    fn development_base_url_can_be_overridden() {
        let config = config(indoc! {r#"
            [upstream]
            environment = "development"

            [upstream.development]
            base_url = "http://127.0.0.1:9000/api/v0"
        "#});

        let client = client_config(&config.upstream, &config.cache, config.upstream.environment);

        assert_eq!(
            Target::Development {
                base_url: "http://127.0.0.1:9000/api/v0".parse().unwrap(),
                accept_invalid_certs: false,
            },
            client.target
        );
    }

    #[test]
    fn cache_and_timeout_settings() {
        let config = config(indoc! {r#"
            [upstream]
            timeout = "5s"

            [cache]
            enabled = true
            ttl = "10s"
        "#});

        let client = client_config(&config.upstream, &config.cache, Environment::Production);

        assert_eq!(Duration::from_secs(5), client.timeout);
        assert_eq!(
            Some(CacheSettings {
                max_entries: 1000,
                ttl: Duration::from_secs(10),
            }),
            client.cache
        );
    }

    #[test]
    fn credentials_are_required() {
        let error = generate(
            &config(""),
            Environment::Production,
            SecretString::new(String::new()),
            SecretString::new("secret".to_string()),
        )
        .err()
        .unwrap();

        assert_eq!(
            "configuring the Letterboxd client: the Letterboxd API key is missing or empty",
            error.to_string()
        );
    }
}
