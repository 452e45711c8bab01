use criterion::{black_box, criterion_group, criterion_main, Criterion};
use season_core::config::SimConfig;
use season_core::game::GameRecord;
use season_core::league::simulate_league;
use season_core::leverage::all_game_leverage;
use season_core::simulator::SeasonWinSimulator;
use season_core::win_prob::win_prob_from_spread;

fn create_midseason() -> Vec<GameRecord> {
    let mut games: Vec<GameRecord> = (0..6).map(|i| GameRecord::completed(i % 3 != 0)).collect();
    for i in 0..6 {
        games.push(GameRecord::remaining(Some(0.3 + i as f64 * 0.1)));
    }
    games
}

fn create_league(n_teams: usize) -> Vec<(String, Vec<GameRecord>)> {
    (0..n_teams)
        .map(|t| {
            let games = (0..12)
                .map(|g| {
                    if g < 8 {
                        GameRecord::completed((t + g) % 2 == 0)
                    } else {
                        GameRecord::remaining(Some(((t * 7 + g) % 10) as f64 / 10.0))
                    }
                })
                .collect();
            (format!("Team{}", t), games)
        })
        .collect()
}

fn bench_win_prob_from_spread(c: &mut Criterion) {
    c.bench_function("win_prob_from_spread", |b| {
        b.iter(|| win_prob_from_spread(black_box(7.5), black_box(14.0)))
    });
}

fn bench_simulate(c: &mut Criterion) {
    let sim = SeasonWinSimulator::new(SimConfig::default().with_seed(42)).unwrap();
    let games = create_midseason();

    c.bench_function("simulate_20000_samples_6_remaining", |b| {
        b.iter(|| sim.simulate(black_box(&games)))
    });
}

fn bench_exact(c: &mut Criterion) {
    let sim = SeasonWinSimulator::default();
    let games = create_midseason();

    c.bench_function("exact_6_remaining", |b| b.iter(|| sim.exact(black_box(&games))));

    c.bench_function("all_game_leverage_6_remaining", |b| {
        b.iter(|| all_game_leverage(&sim, black_box(&games)))
    });
}

fn bench_league(c: &mut Criterion) {
    // Fewer samples keep a 130-team batch practical
    let sim = SeasonWinSimulator::new(SimConfig::default().with_sample_count(2_000)).unwrap();
    let league = create_league(130);

    c.bench_function("simulate_league_130_teams", |b| {
        b.iter(|| simulate_league(&sim, black_box(&league), Some(42)))
    });
}

criterion_group!(
    benches,
    bench_win_prob_from_spread,
    bench_simulate,
    bench_exact,
    bench_league,
);
criterion_main!(benches);
