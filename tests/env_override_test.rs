//! Runs in its own test binary because it sets process environment variables.

mod common;

use common::{LOCAL_ENV, scratch, write};
use kafka_producer::config::Config;

#[test]
fn process_environment_overrides_local_env_file() {
    let (_dir, paths) = scratch();
    write(&paths.env_file, LOCAL_ENV);

    unsafe {
        std::env::set_var("TOPIC_NAME", "from-environment");
    }

    let config = Config::load_from(&paths).unwrap();
    assert_eq!(config.topic_name, "from-environment");
    assert_eq!(config.app_env, "prod");

    unsafe {
        std::env::remove_var("TOPIC_NAME");
    }
}
