// Scores and theme written by one run are visible to the next.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use typespeed::app_dirs::AppDirs;
use typespeed::clock::FakeClock;
use typespeed::controller::Controller;
use typespeed::history::HISTORY_LIMIT;
use typespeed::session::TestDuration;
use typespeed::sound::Muted;
use typespeed::store::{FileStore, Persistence};
use typespeed::theme::Theme;

fn controller(dirs: &AppDirs, clock: &FakeClock) -> Controller<FileStore, FakeClock, StdRng> {
    Controller::new(
        Persistence::new(FileStore::in_dirs(dirs)),
        clock.clone(),
        StdRng::seed_from_u64(3),
        Box::new(Muted),
    )
}

#[test]
fn history_and_theme_survive_restart() {
    let tmp = TempDir::new().unwrap();
    let dirs = AppDirs::resolve(Some(tmp.path().to_path_buf()));
    let clock = FakeClock::at_ms(0);

    {
        let mut ctl = controller(&dirs, &clock);
        ctl.toggle_theme();
        ctl.start_session(TestDuration::Thirty, &["ok"]);
        clock.advance_secs(3);
        ctl.type_char('o');
        ctl.type_char('k');
    }

    let ctl = controller(&dirs, &clock);
    assert_eq!(ctl.theme(), Theme::Light);
    assert_eq!(ctl.history().len(), 1);
    assert_eq!(ctl.history().latest().unwrap().duration_secs, 30);

    let store = ctl.persistence().store();
    assert_eq!(store.path(), dirs.store_path().as_path());
    assert!(store.path().exists());
}

#[test]
fn history_is_capped_across_runs() {
    let tmp = TempDir::new().unwrap();
    let dirs = AppDirs::resolve(Some(tmp.path().to_path_buf()));
    let clock = FakeClock::at_ms(0);

    for _ in 0..HISTORY_LIMIT + 3 {
        let mut ctl = controller(&dirs, &clock);
        ctl.start_session(TestDuration::Sixty, &["x"]);
        ctl.end_early();
    }

    let ctl = controller(&dirs, &clock);
    assert_eq!(ctl.history().len(), HISTORY_LIMIT);
}

#[test]
fn corrupt_store_starts_fresh() {
    let tmp = TempDir::new().unwrap();
    let dirs = AppDirs::resolve(Some(tmp.path().to_path_buf()));
    std::fs::write(dirs.store_path(), "{ not json").unwrap();

    let clock = FakeClock::at_ms(0);
    let mut ctl = controller(&dirs, &clock);
    assert!(ctl.history().is_empty());
    assert_eq!(ctl.theme(), Theme::Dark);

    ctl.start_session(TestDuration::Thirty, &["x"]);
    ctl.end_early();
    assert_eq!(controller(&dirs, &clock).history().len(), 1);
}
