//! End-to-end lifecycle tests through the signed-request front door.

use std::sync::Arc;

use plume_sdk::{AuthorKey, Blog, Credits, Outcome, PostError, PostOp, SdkError};
use plume_types::{ManualClock, Timestamp};

const FUND: Credits = Credits::new(1_000_000);

fn blog() -> (Blog<Arc<ManualClock>>, AuthorKey) {
    let clock = Arc::new(ManualClock::starting_at(1_700_000_000));
    let blog = Blog::with_clock(clock);
    let author = AuthorKey::generate();
    blog.fund(&author.author_id(), FUND).unwrap();
    (blog, author)
}

#[test]
fn signed_create_update_delete_round_trip() {
    let (blog, author) = blog();
    let me = author.author_id();

    let create = PostOp::Create {
        title: "Hello Plume".into(),
        content: "First update".into(),
    };
    let outcome = blog.submit(&create.seal(&author).unwrap()).unwrap();
    let created = match outcome {
        Outcome::Created(post) => post,
        other => panic!("expected Created, got {other:?}"),
    };
    assert_eq!(created.owner, me);
    assert_eq!(created.created_at, created.updated_at);

    let update = PostOp::Update {
        owner: me,
        title: "Hello Plume".into(),
        new_title: "Hello Plume".into(),
        new_content: "Second update".into(),
    };
    let outcome = blog.submit(&update.seal(&author).unwrap()).unwrap();
    let updated = match outcome {
        Outcome::Updated(post) => post,
        other => panic!("expected Updated, got {other:?}"),
    };
    assert_eq!(updated.content, "Second update");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(blog.get(&me, "Hello Plume").unwrap().content, "Second update");

    let delete = PostOp::Delete {
        owner: me,
        title: "Hello Plume".into(),
    };
    let outcome = blog.submit(&delete.seal(&author).unwrap()).unwrap();
    let refund = match outcome {
        Outcome::Deleted { refund } => refund,
        other => panic!("expected Deleted, got {other:?}"),
    };
    assert!(refund > Credits::ZERO);
    // Full deposit returned.
    assert_eq!(blog.balance(&me).unwrap(), FUND);
    assert!(matches!(
        blog.get(&me, "Hello Plume").unwrap_err(),
        PostError::NotInitialized(_)
    ));
}

#[test]
fn forged_envelope_is_rejected_before_the_store() {
    let (blog, author) = blog();
    let me = author.author_id();
    blog.create(&me, "post", "body").unwrap();

    // An intruder signs a delete naming someone else's record. The
    // signature is valid, so the store sees the intruder's identity and
    // refuses with Unauthorized.
    let intruder = AuthorKey::generate();
    let op = PostOp::Delete {
        owner: me,
        title: "post".into(),
    };
    let err = blog.submit(&op.seal(&intruder).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SdkError::Post(PostError::Unauthorized { .. })
    ));
    assert!(blog.get(&me, "post").is_ok());
}

#[test]
fn signed_but_malformed_payload_is_rejected() {
    let (blog, author) = blog();
    // A validly signed envelope whose payload is not an operation: the
    // signature check passes but decoding refuses it before the store.
    let envelope = plume_sdk::Envelope::seal(&author, b"not an op".to_vec());
    assert!(matches!(
        blog.submit(&envelope).unwrap_err(),
        SdkError::MalformedOp(_)
    ));
    assert!(blog.list(None).unwrap().is_empty());
}

#[test]
fn duplicate_create_conflicts_and_leaves_first_intact() {
    let (blog, author) = blog();
    let me = author.author_id();
    let op = PostOp::Create {
        title: "once".into(),
        content: "original".into(),
    };
    blog.submit(&op.seal(&author).unwrap()).unwrap();

    let second = PostOp::Create {
        title: "once".into(),
        content: "imposter".into(),
    };
    let err = blog.submit(&second.seal(&author).unwrap()).unwrap_err();
    assert!(matches!(err, SdkError::Post(PostError::AlreadyExists(_))));
    assert_eq!(blog.get(&me, "once").unwrap().content, "original");
}

#[test]
fn validation_failures_surface_verbatim() {
    let (blog, author) = blog();
    let cases = [
        (
            PostOp::Create {
                title: String::new(),
                content: "body".into(),
            },
            PostError::TitleEmpty,
        ),
        (
            PostOp::Create {
                title: "t".repeat(101),
                content: "body".into(),
            },
            PostError::TitleTooLong { chars: 101 },
        ),
        (
            PostOp::Create {
                title: "title".into(),
                content: String::new(),
            },
            PostError::ContentEmpty,
        ),
        (
            PostOp::Create {
                title: "title".into(),
                content: "c".repeat(1001),
            },
            PostError::ContentTooLong { chars: 1001 },
        ),
    ];
    for (op, expected) in cases {
        match blog.submit(&op.seal(&author).unwrap()).unwrap_err() {
            SdkError::Post(err) => assert_eq!(err, expected),
            other => panic!("expected post error, got {other:?}"),
        }
    }
    assert!(blog.list(None).unwrap().is_empty());
}

#[test]
fn list_filters_by_owner() {
    let (blog, alice_key) = blog();
    let alice = alice_key.author_id();
    let bob_key = AuthorKey::generate();
    let bob = bob_key.author_id();
    blog.fund(&bob, FUND).unwrap();

    blog.create(&alice, "a1", "body").unwrap();
    blog.create(&alice, "a2", "body").unwrap();
    blog.create(&bob, "b1", "body").unwrap();

    let alices = blog.list(Some(&alice)).unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|p| p.owner == alice));
    assert_eq!(blog.list(Some(&bob)).unwrap().len(), 1);
    assert_eq!(blog.list(None).unwrap().len(), 3);
}

#[test]
fn latest_orders_newest_first() {
    let clock = Arc::new(ManualClock::starting_at(100));
    let blog: Blog<Arc<ManualClock>> = Blog::with_clock(Arc::clone(&clock));
    let author = AuthorKey::generate();
    let me = author.author_id();
    blog.fund(&me, FUND).unwrap();

    blog.create(&me, "oldest", "body").unwrap();
    clock.advance(10);
    blog.create(&me, "middle", "body").unwrap();
    clock.advance(10);
    blog.create(&me, "newest", "body").unwrap();

    let posts = blog.latest(Some(&me)).unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["newest", "middle", "oldest"]);
    assert_eq!(posts[0].created_at, Timestamp::from_secs(120));
}

#[test]
fn title_rename_keeps_record_reachable() {
    let (blog, author) = blog();
    let me = author.author_id();
    blog.create(&me, "draft", "body").unwrap();

    let op = PostOp::Update {
        owner: me,
        title: "draft".into(),
        new_title: "published".into(),
        new_content: "body".into(),
    };
    blog.submit(&op.seal(&author).unwrap()).unwrap();

    assert_eq!(blog.get(&me, "published").unwrap().title, "published");
    assert!(matches!(
        blog.get(&me, "draft").unwrap_err(),
        PostError::NotInitialized(_)
    ));
    // Deleting under the new title refunds everything.
    blog.delete(&me, &me, "published").unwrap();
    assert_eq!(blog.balance(&me).unwrap(), FUND);
}
