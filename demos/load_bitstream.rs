//! Example loading bitstreams into an array of memory cores and printing each
//! core's resulting configuration

use std::collections::BTreeSet;

use memory_core::{AddressRouter, Bitstream, Configurable, MemoryCore};

fn main() {
    for path in std::env::args_os().skip(1) {
        let bitstream = Bitstream::from_file(&path).expect("Failed to parse bitstream");

        let mut router: AddressRouter<MemoryCore> = Default::default();
        let layout = router.layout();
        let ids: BTreeSet<_> = bitstream.entries().map(|(a, _)| layout.decode(a).tile).collect();
        ids.into_iter().for_each(|id| { router.add_tile(MemoryCore::new(id, Default::default())); });

        let committed = bitstream.load(&mut router).expect("Failed to load bitstream");
        println!("{}: {} of {} writes committed", path.to_string_lossy(), committed, bitstream.len());

        router.tiles().for_each(|core| {
            let word = core.mode().word();
            print!("tile {}: {} depth {}", core.tile().id(), word.mode, word.depth);
            if !word.tile_enable {
                print!(" (disabled)");
            }
            println!();
        });
    }
}
