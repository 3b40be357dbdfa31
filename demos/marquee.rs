use signflow::{Controller, PlayState, SequenceDocument, SequenceEvent};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/marquee.json");
    let doc = SequenceDocument::from_json(s)?;
    let mut sign = Controller::from_document(&doc)?;
    sign.subscribe(|e| {
        if let SequenceEvent::PhaseStart { index } = e {
            println!("-- step {index}");
        }
    });

    sign.play(0.0)?;
    let mut now = 0.0;
    let mut next_dump = 0.0;
    while sign.status().state != PlayState::Idle {
        now += 1000.0 / 60.0;
        sign.tick(now)?;
        if now >= next_dump {
            println!("{now:>7.0}ms\n{}\n", sign.ascii());
            next_dump += 500.0;
        }
    }

    let wear: u64 = sign.wear().map_or(0, |w| w.iter().map(|n| u64::from(*n)).sum());
    println!("finished at {now:.0}ms, {wear} flips");
    Ok(())
}
