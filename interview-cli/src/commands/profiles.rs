use anyhow::Result;
use clap::Args;
use interview_core::QuestionBank;

use crate::config::ConfigLoader;

#[derive(Args)]
pub struct ProfilesArgs {
    /// Print the questions of a single profile
    pub name: Option<String>,
}

pub fn run(args: ProfilesArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let bank = QuestionBank::builtin().with_profiles(config.profiles);

    match args.name {
        Some(name) => {
            for (index, prompt) in bank.resolve(Some(name.as_str())).iter().enumerate() {
                println!("{:>2}. {}", index + 1, prompt);
            }
        }
        None => {
            for name in bank.names() {
                let count = bank.get(name).map_or(0, <[String]>::len);
                println!("{:<16} {} questions", name, count);
            }
        }
    }
    Ok(())
}
