// Locks command - list launches still being reported

use anyhow::Result;

use crate::cli::args::LocksArgs;
use crate::config::Config;
use crate::merge::list_launch_locks;

pub fn handle_locks(args: &LocksArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => {
            let config = match &args.config {
                Some(path) => Config::load_from_file(path)?,
                None => Config::load()?,
            };
            config.merge.lock_dir
        }
    };

    for lock in list_launch_locks(&dir)? {
        println!("{}", lock.display());
    }

    Ok(())
}
