use spacecraft::config::SceneConfig;

fn main() -> anyhow::Result<()> {
    spacecraft::flow::run(SceneConfig::from_env())
}
