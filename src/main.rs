use leaffall::DemoConfig;

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let config = DemoConfig::from_env()?;
    log::info!("Starting {} with seed {}", config.title, config.seed);

    leaffall::run(config)?;
    Ok(())
}
