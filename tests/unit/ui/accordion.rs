use super::*;

fn three_steps() -> Accordion {
    let mut acc = Accordion::new(vec![
        StepDef::new("Choose design", 220.0),
        StepDef::new("Adjust colors", 180.0),
        StepDef::new("Add name & logo", 260.0),
    ]);
    acc.layout_ready();
    acc
}

fn open_steps(acc: &Accordion) -> Vec<usize> {
    acc.steps()
        .into_iter()
        .filter(|s| s.open)
        .map(|s| s.number)
        .collect()
}

#[test]
fn layout_ready_opens_first_step() {
    let acc = three_steps();
    assert_eq!(acc.current(), 1);
    assert_eq!(open_steps(&acc), vec![1]);
    let b = acc.buttons();
    assert!(!b.back_enabled);
    assert_eq!(b.back_opacity, 0.5);
    assert_eq!(b.next_label, "Next");
}

#[test]
fn next_walks_forward_then_exports() {
    let mut acc = three_steps();
    assert_eq!(acc.next(), Navigation::Moved(2));
    assert_eq!(acc.next(), Navigation::Moved(3));
    assert_eq!(acc.buttons().next_label, "Download card");
    assert_eq!(acc.next(), Navigation::Export);
    assert_eq!(acc.next(), Navigation::Export);
    assert_eq!(acc.current(), 3);
    assert_eq!(open_steps(&acc), vec![3]);
}

#[test]
fn back_stops_at_first_step() {
    let mut acc = three_steps();
    acc.open_step(3);
    assert_eq!(acc.back(), Navigation::Moved(2));
    assert_eq!(acc.back(), Navigation::Moved(1));
    assert_eq!(acc.back(), Navigation::Stayed);
    assert_eq!(acc.current(), 1);
}

#[test]
fn exactly_one_step_open_after_any_open() {
    let mut acc = three_steps();
    for n in [3, 1, 2, 2, 3] {
        acc.open_step(n);
        assert_eq!(open_steps(&acc), vec![n]);
        let views = acc.steps();
        for v in &views {
            let expected = if v.number == n { 1.0 } else { 0.6 };
            assert_eq!(v.opacity, expected);
        }
    }
}

#[test]
fn clicking_open_step_collapses_then_reopens() {
    let mut acc = three_steps();
    acc.toggle(1);
    assert!(open_steps(&acc).is_empty());
    assert_eq!(acc.current(), 1);
    acc.toggle(1);
    assert_eq!(open_steps(&acc), vec![1]);
    acc.toggle(2);
    assert_eq!(open_steps(&acc), vec![2]);
}

#[test]
fn out_of_range_open_is_ignored() {
    let mut acc = three_steps();
    assert!(!acc.open_step(0));
    assert!(!acc.open_step(4));
    assert_eq!(open_steps(&acc), vec![1]);
}

#[test]
fn heights_animate_to_measured_content() {
    let mut acc = three_steps();
    assert!(acc.is_animating());
    acc.advance(0.3);
    let mid = acc.steps()[0].height;
    assert!(mid > 0.0 && mid < 220.0);
    acc.advance(0.4);
    assert!(!acc.is_animating());
    assert_eq!(acc.steps()[0].height, 220.0);

    acc.open_step(2);
    acc.advance(1.0);
    let views = acc.steps();
    assert_eq!(views[0].height, 0.0);
    assert_eq!(views[1].height, 180.0);

    acc.measure(2, 200.0);
    acc.advance(1.0);
    assert_eq!(acc.steps()[1].height, 200.0);
}

#[test]
fn empty_wizard_never_exports() {
    let mut acc = Accordion::new(Vec::new());
    acc.layout_ready();
    assert_eq!(acc.next(), Navigation::Stayed);
    assert_eq!(acc.back(), Navigation::Stayed);
}
