use chrono::NaiveDate;
use tempfile::TempDir;

use threedaysfit::Database;
use threedaysfit::log_form::LogForm;
use threedaysfit::session::{SessionStore, User};
use threedaysfit::tracker::{CompletionSignal, ExerciseCard, TrackerEvent, chime::Chime};
use threedaysfit::program::find_exercise;

struct Silent;

impl Chime for Silent {
    fn play(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn open(dir: &TempDir) -> Database {
    let path = dir.path().join("fit.db");
    Database::open(path.to_str().unwrap()).unwrap()
}

#[test]
fn test_logs_survive_reopen_and_feed_stats() {
    let dir = TempDir::new().unwrap();

    let id = {
        let db = open(&dir);
        let mut form = LogForm::new(today());
        form.day = "upper".into();
        form.exercise = "bench press".into();
        form.weight = 42.5;
        let log = db.save_log(form.validate().unwrap()).unwrap();
        assert_eq!(log.exercise, "Bench Press");

        let mut form = LogForm::new(today().pred_opt().unwrap());
        form.day = "legs".into();
        form.exercise = "Barbell Squats".into();
        db.save_log(form.validate().unwrap()).unwrap();
        log.id
    };

    let db = open(&dir);
    let stats = db.stats(today()).unwrap();
    assert_eq!(stats.total_workouts, 2);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.avg_weekly, 0.5);

    assert!(db.delete_log(&id).unwrap());
    assert!(!db.delete_log(&id).unwrap());
    assert_eq!(db.get_logs().unwrap().len(), 1);
}

#[test]
fn test_invalid_form_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);

    let mut form = LogForm::new(today());
    form.day = "back".into();
    form.exercise = "Bench Press".into();
    form.sets = 0;
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(db.get_logs().unwrap().is_empty());
}

#[test]
fn test_set_progress_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let exercise = find_exercise("Dumbbell Curls").unwrap();
    let signal = || CompletionSignal::new(None, Box::new(Silent));

    {
        let db = open(&dir);
        let mut card = ExerciseCard::load(&db, exercise, today(), signal()).unwrap();
        card.complete_next(&db).unwrap();
        card.complete_next(&db).unwrap();
    }

    let db = open(&dir);
    let mut card = ExerciseCard::load(&db, exercise, today(), signal()).unwrap();
    assert_eq!(card.sets().completed_count(), 2);
    assert_eq!(card.complete_next(&db).unwrap(), Some(TrackerEvent::Celebration));

    // A new day starts with a clean checklist
    let tomorrow = today().succ_opt().unwrap();
    let card = ExerciseCard::load(&db, exercise, tomorrow, signal()).unwrap();
    assert_eq!(card.sets().completed_count(), 0);
}

#[test]
fn test_session_survives_reopen_until_logout() {
    let dir = TempDir::new().unwrap();
    let user = User {
        id: "42".into(),
        name: "Alex Kim".into(),
        email: "alex@example.com".into(),
        picture: None,
        access_token: Some("token".into()),
    };

    {
        let db = open(&dir);
        let store = SessionStore::new(&db);
        store.login(store.load().unwrap(), user.clone()).unwrap();
    }

    let db = open(&dir);
    let store = SessionStore::new(&db);
    let session = store.load().unwrap();
    assert_eq!(session.user(), Some(&user));

    store.logout(session).unwrap();
    let db = open(&dir);
    assert!(!SessionStore::new(&db).load().unwrap().is_authenticated());
}
