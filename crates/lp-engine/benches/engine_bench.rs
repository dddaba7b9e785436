use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lp_engine::{
    Degree, Duration, Layer, ManualClock, Run, Sequencer, SequencerConfig, SUBDIVISIONS_PER_BAR,
};

#[derive(Clone, Default)]
struct Counter {
    running: bool,
    ticks: u64,
}

impl Layer for Counter {
    fn start(&mut self, _degree: Degree) {
        self.running = true;
    }
    fn stop(&mut self) {
        self.running = false;
    }
    fn click(&mut self) {
        self.ticks += 1;
    }
    fn is_running(&self) -> bool {
        self.running
    }
}

fn looping_sequencer() -> Sequencer<Vec<Counter>, ManualClock> {
    let mut seq = Sequencer::new(
        vec![Counter::default(); 8],
        ManualClock::new(),
        SequencerConfig::default(),
    );
    seq.record();
    for degree in 1..=4 {
        let handle = seq.start(Degree(degree)).unwrap();
        seq.run(Duration::from_subdivisions(SUBDIVISIONS_PER_BAR as u64 / 2));
        seq.stop(handle).unwrap();
    }
    seq.record();
    seq
}

fn bench_click(c: &mut Criterion) {
    c.bench_function("click_async_not_due", |b| {
        let mut seq = looping_sequencer();
        seq.click(Run::Sync);
        b.iter(|| black_box(seq.click(Run::Async)));
    });

    c.bench_function("click_sync_playback_bar", |b| {
        let mut seq = looping_sequencer();
        b.iter(|| {
            for _ in 0..SUBDIVISIONS_PER_BAR {
                black_box(seq.click(Run::Sync));
            }
        });
    });
}

criterion_group!(benches, bench_click);
criterion_main!(benches);
