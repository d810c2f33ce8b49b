use super::*;

#[test]
fn plain_animal_continues_play() {
    assert_eq!(judge(Speaker::A, "Elephant", MAX_REPLY_CHARS), None);
    assert_eq!(judge(Speaker::B, "", MAX_REPLY_CHARS), None);
}

#[test]
fn forfeit_penalizes_speaker() {
    let verdict = judge(Speaker::B, "I forfeit the game.", MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::Forfeit);
    assert_eq!(verdict.winner, Speaker::A);
    assert_eq!(verdict.reason, "B forfeited");

    let verdict = judge(Speaker::A, "FORFEIT", MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.winner, Speaker::B);
    assert_eq!(verdict.reason, "A forfeited");
}

#[test]
fn disqualification_penalizes_opponent() {
    let reply = "Disqualified: Tiger was already used.";
    let verdict = judge(Speaker::A, reply, MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::Disqualification);
    // A made the call, so A wins and B is the one disqualified
    assert_eq!(verdict.winner, Speaker::A);
    assert_eq!(verdict.reason, format!("B disqualified: {reply}"));

    let verdict = judge(Speaker::B, "disqualified", MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.winner, Speaker::B);
    assert_eq!(verdict.reason, "A disqualified: disqualified");
}

#[test]
fn forfeit_and_disqualification_differ_in_who_wins() {
    let forfeit = judge(Speaker::A, "forfeit", MAX_REPLY_CHARS).unwrap();
    let disqualified = judge(Speaker::A, "disqualified", MAX_REPLY_CHARS).unwrap();
    assert_eq!(forfeit.winner, Speaker::B);
    assert_eq!(disqualified.winner, Speaker::A);
}

#[test]
fn forfeit_beats_length_check() {
    let reply = "I cannot think of anything else, so I forfeit the game.";
    assert!(reply.chars().count() > MAX_REPLY_CHARS);
    let verdict = judge(Speaker::A, reply, MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::Forfeit);
}

#[test]
fn disqualification_beats_length_check() {
    let reply = "Disqualified because Elephant does not start with the letter T.";
    assert!(reply.chars().count() > MAX_REPLY_CHARS);
    let verdict = judge(Speaker::B, reply, MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::Disqualification);
}

#[test]
fn forfeit_beats_disqualification() {
    let verdict = judge(Speaker::B, "Disqualified, or I forfeit", MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::Forfeit);
    assert_eq!(verdict.winner, Speaker::A);
}

#[test]
fn length_boundary_is_exclusive() {
    let thirty = "a".repeat(30);
    let thirty_one = "a".repeat(31);
    assert_eq!(judge(Speaker::A, &thirty, MAX_REPLY_CHARS), None);

    let verdict = judge(Speaker::A, &thirty_one, MAX_REPLY_CHARS).unwrap();
    assert_eq!(verdict.kind, Termination::TooLong);
    assert_eq!(verdict.winner, Speaker::B);
    assert_eq!(verdict.reason, "A response too long (so not an animal)");
}

#[test]
fn length_counts_characters_not_bytes() {
    // 20 characters, 40 bytes
    let reply = "é".repeat(20);
    assert!(reply.len() > MAX_REPLY_CHARS);
    assert_eq!(judge(Speaker::A, &reply, MAX_REPLY_CHARS), None);
}

#[test]
fn verdict_becomes_outcome() {
    let outcome = judge(Speaker::B, "forfeit", MAX_REPLY_CHARS)
        .unwrap()
        .into_outcome(7);
    assert_eq!(outcome.game_id, 7);
    assert_eq!(outcome.winner.label(), "Model A");
    assert_eq!(outcome.reason, "B forfeited");
}

#[test]
fn recorded_reasons_classify_back() {
    for (speaker, reply, kind) in [
        (Speaker::A, "forfeit", Termination::Forfeit),
        (Speaker::B, "Disqualified: repeat", Termination::Disqualification),
        (Speaker::A, "a very long sentence that is not an animal", Termination::TooLong),
    ] {
        let verdict = judge(speaker, reply, MAX_REPLY_CHARS).unwrap();
        assert_eq!(classify_reason(&verdict.reason), Some(kind));
    }
    assert_eq!(classify_reason("No conclusion"), None);
}
