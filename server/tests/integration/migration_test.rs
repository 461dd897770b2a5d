//! ファイルDBでのマイグレーションと再接続

use truecrime_common::auth::NewAccount;
use truecrime_server::db::{
    migrations::{close_database, initialize_database},
    users,
};

#[tokio::test]
async fn test_file_database_survives_restart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("truecrime.db").display());

    let pool = initialize_database(&url).await.unwrap();
    let created = users::create(
        &pool,
        NewAccount {
            username: "alice".to_string(),
            mail: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            access_token: "token-a".to_string(),
        },
    )
    .await
    .unwrap();
    close_database(&pool).await;
    assert!(pool.is_closed());

    // 再初期化してもマイグレーションは冪等で、データは残る
    let pool = initialize_database(&url).await.unwrap();
    let found = users::find_by_token(&pool, "token-a").await.unwrap().unwrap();
    assert_eq!(found, created);
    close_database(&pool).await;
}

#[tokio::test]
async fn test_concurrent_duplicate_registration_has_one_winner() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("race.db").display());
    let pool = initialize_database(&url).await.unwrap();

    let attempts: Vec<_> = (0..8)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                users::create(
                    &pool,
                    NewAccount {
                        username: "alice".to_string(),
                        mail: format!("a{}@x.com", i),
                        password_hash: "hash".to_string(),
                        access_token: format!("token-{}", i),
                    },
                )
                .await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) if e.is_duplicate_key() => duplicates += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(users::list(&pool).await.unwrap().len(), 1);
    close_database(&pool).await;
}
