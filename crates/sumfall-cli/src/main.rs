mod command;
mod logger;
mod protocol;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
