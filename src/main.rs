use std::process;

use rochambeau::{assets::AssetDir, logging, Rochambeau, Runner};

fn main() {
    let assets = AssetDir::locate();
    if let Err(e) = logging::init(assets.base()) {
        eprintln!("not logging: {}", e);
    }
    log::info!("loading assets from {}", assets.root().display());

    let game = Rochambeau::load(&assets);
    match Runner::new(game).load_run(&assets) {
        Ok(game) => log::info!("finished after {} rounds", game.session().score().rounds()),
        Err(errs) => {
            eprintln!("couldn't start any display:");
            for (sys, err) in errs {
                log::error!("{} failed to load: {}", sys, err);
                eprintln!("  {}: {}", sys, err);
            }
            process::exit(1);
        }
    }
}
