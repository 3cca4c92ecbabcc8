use costume_core::component::AnimState;
use costume_core::{
    ChoreId, ComponentId, Costume, CostumeId, DrawCall, DrawLog, FsNameLoader, PlayState,
    PoseContribution, ScriptRequest,
};
use costume_test_fixtures::{costumes, ChoreDesc, CostumeDesc, TrackDesc};

fn guybrush() -> Costume {
    let bytes = costumes::bytes("guybrush").unwrap();
    Costume::from_bytes(
        CostumeId(0),
        "guybrush.cos",
        &bytes,
        None,
        Box::new(FsNameLoader::default()),
    )
    .unwrap()
}

fn id(costume: &Costume, name: &str) -> ChoreId {
    costume.chore_by_name(name).unwrap()
}

#[test]
fn playing_a_wear_chore_binds_its_skeleton_first() {
    let mut c = guybrush();
    let wear = id(&c, "wear");
    assert_eq!(c.wear_chore(), None);
    assert!(c.skeleton().is_none());

    c.play_chore(wear).unwrap();
    assert_eq!(c.wear_chore(), Some(wear));
    assert_eq!(c.active_skeleton(), Some(ComponentId(1)));
    assert!(c.is_chore_playing(wear));

    // Playing a chore that is not a wear chore leaves the outfit alone.
    let blink = id(&c, "blink");
    c.play_chore(blink).unwrap();
    assert_eq!(c.wear_chore(), Some(wear));
}

#[test]
fn wearing_the_same_chore_twice_is_a_no_op() {
    let mut c = guybrush();
    let wear = id(&c, "wear");
    c.set_wear_chore(wear).unwrap();
    c.update(0);
    let resets = c.skeleton().unwrap().reset_count();

    c.set_wear_chore(wear).unwrap();
    assert_eq!(c.skeleton().unwrap().reset_count(), resets);
    assert_eq!(c.active_skeleton(), Some(ComponentId(1)));
}

#[test]
fn out_of_range_chore_is_an_error() {
    let mut c = guybrush();
    assert!(c.play_chore(ChoreId(99)).is_err());
    assert!(c.set_wear_chore(ChoreId(5)).is_err());
    assert_eq!(c.playing_chores().count(), 0);
}

#[test]
fn playing_set_is_most_recent_first_without_duplicates() {
    let mut c = guybrush();
    let (walk, glow, talk) = (id(&c, "walk"), id(&c, "glow"), id(&c, "talk"));
    c.play_chore_looping(walk).unwrap();
    c.play_chore(glow).unwrap();
    c.play_chore(talk).unwrap();
    c.play_chore(glow).unwrap();
    assert_eq!(c.playing_chores().collect::<Vec<_>>(), vec![talk, glow, walk]);

    c.stop_chore(glow).unwrap();
    assert_eq!(c.playing_chores().collect::<Vec<_>>(), vec![talk, walk]);
    assert_eq!(c.chore(glow).unwrap().state(), PlayState::Stopped);

    c.stop_all();
    assert_eq!(c.playing_chores().count(), 0);
    assert_eq!(c.chore(walk).unwrap().state(), PlayState::Stopped);
}

#[test]
fn finished_chores_leave_the_playing_set() {
    let mut c = guybrush();
    let wear = id(&c, "wear");
    c.play_chore(wear).unwrap();

    // Zero-length chore: the first update fires t=0 keys, the next one ends it.
    let report = c.update(0);
    assert!(report.finished.is_empty());
    assert!(c.is_chore_playing(wear));

    let report = c.update(16);
    assert_eq!(report.finished, vec![wear]);
    assert!(!c.is_chore_playing(wear));
    assert_eq!(c.chore(wear).unwrap().state(), PlayState::Stopped);
    // The outfit outlives the chore that put it on.
    assert_eq!(c.wear_chore(), Some(wear));
}

#[test]
fn looping_chore_keeps_playing_past_its_length() {
    let mut c = guybrush();
    let walk = id(&c, "walk");
    c.play_chore_looping(walk).unwrap();
    c.update(0);
    for _ in 0..10 {
        let report = c.update(750);
        assert!(report.finished.is_empty());
    }
    assert!(c.is_chore_playing(walk));
    let t = c.chore(walk).unwrap().time_ms();
    assert!((0..=2000).contains(&t), "time {t}");
}

#[test]
fn animation_pose_is_committed_to_the_worn_skeleton() {
    let mut c = guybrush();
    let (wear, walk) = (id(&c, "wear"), id(&c, "walk"));
    c.play_chore(wear).unwrap();
    c.update(0);
    assert!(c.skeleton().unwrap().committed_pose().is_empty());

    c.play_chore_looping(walk).unwrap();
    c.update(0);
    c.update(100);
    let anim = c.component(ComponentId(3)).unwrap().as_anim().unwrap();
    assert_eq!(anim.state, AnimState::Running);
    assert_eq!(anim.time_ms, 100);

    let skel = c.skeleton().unwrap();
    assert_eq!(
        skel.committed_pose(),
        &[PoseContribution {
            animation: "walk.animb".into(),
            time_ms: 100,
        }]
    );
    // Reset once per update, committed once per update.
    assert_eq!(skel.reset_count(), 3);
    assert_eq!(skel.commit_count(), 3);
}

#[test]
fn texture_keys_switch_the_active_texture() {
    let mut c = guybrush();
    let blink = id(&c, "blink");
    let mat = c
        .component(ComponentId(4))
        .unwrap()
        .as_texture()
        .unwrap()
        .material
        .unwrap();

    c.play_chore(blink).unwrap();
    c.update(0);
    assert_eq!(c.material(mat).unwrap().active_texture(), 1);
    c.update(250);
    assert_eq!(c.material(mat).unwrap().active_texture(), 2);
    c.update(250);
    assert_eq!(c.material(mat).unwrap().active_texture(), 0);
    assert!(c.is_chore_playing(blink));
    assert_eq!(c.update(1).finished, vec![blink]);
}

#[test]
fn script_components_queue_requests_for_the_host() {
    let mut c = guybrush();
    let talk = id(&c, "talk");
    assert_eq!(c.chore(talk).unwrap().length_ms, 1500);
    c.play_chore(talk).unwrap();

    assert_eq!(
        c.update(0).script_requests,
        vec![ScriptRequest::Run {
            chunk: "start_talking".into(),
            key: 1
        }]
    );
    assert_eq!(
        c.update(500).script_requests,
        vec![ScriptRequest::Assign {
            variable: "talk_count".into(),
            value: 3
        }]
    );
    assert_eq!(
        c.update(500).script_requests,
        vec![ScriptRequest::Assign {
            variable: "talk_count".into(),
            value: 4
        }]
    );
    assert!(c.update(100).script_requests.is_empty());
    assert_eq!(
        c.component(ComponentId(7)).unwrap().as_script_var().unwrap().value,
        Some(4)
    );
}

#[test]
fn draw_walks_playing_chores_and_falls_back_to_the_worn_mesh() {
    let mut c = guybrush();
    let (wear, glow) = (id(&c, "wear"), id(&c, "glow"));
    let mut log = DrawLog::default();

    // Nothing worn, nothing playing: nothing drawn.
    assert!(!c.draw(&mut log));
    assert!(log.calls.is_empty());

    c.play_chore(wear).unwrap();
    c.update(0);
    assert!(c.draw(&mut log));
    assert_eq!(log.meshes().collect::<Vec<_>>(), vec!["guybrush.mesh"]);

    // Once the wear chore ends, the worn mesh is still drawn via the fallback.
    c.update(16);
    log.clear();
    assert!(!c.draw(&mut log));
    assert_eq!(log.meshes().collect::<Vec<_>>(), vec!["guybrush.mesh"]);

    c.play_chore(glow).unwrap();
    c.update(0);
    assert!(c.component(ComponentId(5)).unwrap().as_sprite().unwrap().visible);
    log.clear();
    c.draw(&mut log);
    assert_eq!(
        log.calls,
        vec![
            DrawCall::Sprite {
                sprite: "glow.sprb".into()
            },
            DrawCall::Mesh {
                model: "guybrush.mesh".into(),
                shared_from: None
            },
        ]
    );

    // The closing key hides the sprite.
    c.update(300);
    assert!(!c.component(ComponentId(5)).unwrap().as_sprite().unwrap().visible);
    log.clear();
    c.draw(&mut log);
    assert!(!log
        .calls
        .iter()
        .any(|call| matches!(call, DrawCall::Sprite { .. })));
}

#[test]
fn chores_finishing_together_are_each_visited_once() {
    // Two short chores around a long one, each with one script key at 100ms.
    let bytes = CostumeDesc::new()
        .chore(ChoreDesc::new("a", 0.2).track(TrackDesc::new("!luava", -1).keys(&[(0.1, 1.0)])))
        .chore(ChoreDesc::new("b", 0.2).track(TrackDesc::new("!luavb", -1).keys(&[(0.1, 2.0)])))
        .chore(ChoreDesc::new("c", 5.0).track(TrackDesc::new("!luavc", -1).keys(&[(0.1, 3.0)])))
        .encode();
    let mut c = Costume::from_bytes(
        CostumeId(0),
        "trio.cos",
        &bytes,
        None,
        Box::new(FsNameLoader::default()),
    )
    .unwrap();
    let (a, b, long) = (id(&c, "a"), id(&c, "b"), id(&c, "c"));
    c.play_chore(a).unwrap();
    c.play_chore(long).unwrap();
    c.play_chore(b).unwrap();
    assert_eq!(c.playing_chores().collect::<Vec<_>>(), vec![b, long, a]);

    assert!(c.update(0).script_requests.is_empty());

    let report = c.update(300);
    let assign = |variable: &str, value| ScriptRequest::Assign {
        variable: variable.into(),
        value,
    };
    assert_eq!(
        report.script_requests,
        vec![assign("b", 2), assign("c", 3), assign("a", 1)]
    );
    assert_eq!(report.finished, vec![b, a]);
    assert_eq!(c.playing_chores().collect::<Vec<_>>(), vec![long]);
    assert_eq!(c.chore(long).unwrap().time_ms(), 300);

    // The survivor keeps running without replaying its key.
    let report = c.update(300);
    assert!(report.finished.is_empty());
    assert!(report.script_requests.is_empty());
}
