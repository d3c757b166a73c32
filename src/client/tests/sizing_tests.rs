use test_log::test;

use crate::client::dom::{Dom, STYLE_HEIGHT, STYLE_WIDTH};
use crate::client::paintable::Container;
use crate::client::sizing::UNKNOWN_SIZE;
use crate::client::tests::layout_testbed::{label_uidl, layout_uidl, LayoutTestbed, LayoutTestbedBuilder};
use crate::primitives::box_model::{BoxModelMetrics, Edges};
use crate::primitives::render_space::{RelativeSize, RenderSpace};
use crate::server::simple_layout::ATTR_STRIP;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::{Uidl, ATTR_CACHED, ATTR_HEIGHT, ATTR_ID, ATTR_STYLE, ATTR_WIDTH};

fn testbed() -> LayoutTestbed {
    LayoutTestbedBuilder::new()
        .with_class_metrics(
            "v-simplelayout",
            BoxModelMetrics::new(Edges::new(0, 10, 0, 10), Edges::ZERO, Edges::new(0, 5, 0, 5)),
        )
        .with_class_metrics(
            "v-simplelayout-wide",
            BoxModelMetrics::new(Edges::ZERO, Edges::ZERO, Edges::new(0, 20, 0, 20)),
        )
        .build()
}

fn sized(uidl: Uidl, width: Option<&str>, height: Option<&str>) -> Uidl {
    let mut uidl = uidl;
    if let Some(width) = width {
        uidl = uidl.with_attribute(ATTR_WIDTH, width);
    }
    if let Some(height) = height {
        uidl = uidl.with_attribute(ATTR_HEIGHT, height);
    }
    uidl
}

fn inline(testbed: &LayoutTestbed, pid: &str, property: &str) -> Option<String> {
    testbed.session.dom().style_property(testbed.element(pid), property)
}

#[test]
fn outer_width_becomes_content_width() {
    let mut testbed = testbed();
    testbed.apply(&sized(layout_uidl("PID1", vec![]), Some("200px"), None)).unwrap();

    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("170px"));
    let layout = testbed.layout("PID1");
    assert!(layout.sizing().has_width());
    assert!(!layout.sizing().has_height());
    assert_eq!(layout.sizing().width(), 170);
    assert_eq!(layout.sizing().height(), UNKNOWN_SIZE);
    assert_eq!(
        layout.allocated_space(&Pid::new("PID2"), &testbed.session),
        RenderSpace::new(Some(170), None)
    );
    assert!(testbed.session.dom().class_names(testbed.element("PID1")).contains(&"v-simplelayout-PID1".to_string()));
}

#[test]
fn dropping_the_size_clears_the_rule() {
    let mut testbed = testbed();
    testbed.apply(&sized(layout_uidl("PID1", vec![]), Some("200px"), Some("100px"))).unwrap();
    testbed.apply(&sized(layout_uidl("PID1", vec![]), None, Some("100px"))).unwrap();

    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), None);
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_HEIGHT), Some("100px"));
    assert_eq!(
        testbed.layout("PID1").allocated_space(&Pid::new("PID2"), &testbed.session),
        RenderSpace::new(None, Some(100))
    );
    assert_eq!(testbed.dom().rule_count(".v-simplelayout-PID1"), 1);
}

#[test]
fn percent_children_resolve_against_allocated_space() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("50%"), Some("50%"));
    testbed.apply(&sized(layout_uidl("PID1", vec![child]), Some("200px"), None)).unwrap();

    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("85px".to_string()));
    // no height on the layout, so the child sizes itself
    assert_eq!(inline(&testbed, "PID2", STYLE_HEIGHT), None);
    assert_eq!(
        testbed.session.relative_size(&Pid::new("PID2")),
        Some(RelativeSize {
            width: Some(50.0),
            height: Some(50.0),
        })
    );
}

#[test]
fn root_percent_uses_viewport() {
    let mut testbed = testbed();
    testbed.apply(&sized(layout_uidl("PID1", vec![]), Some("100%"), None)).unwrap();
    // 800 viewport minus 2x10 margin minus 2x5 padding
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("770px"));
}

#[test]
fn resize_outside_pass_propagates_to_children() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("50%"), None);
    testbed.apply(&sized(layout_uidl("PID1", vec![child]), Some("200px"), None)).unwrap();
    let layout_el = testbed.element("PID1");
    assert_eq!(testbed.dom().overflow_fix_count(layout_el), 1);

    testbed.session.set_width(&Pid::new("PID1"), Some(300)).unwrap();
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("270px"));
    assert_eq!(testbed.layout("PID1").sizing().width(), 270);
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("135px".to_string()));
    assert_eq!(testbed.dom().overflow_fix_count(layout_el), 2);

    testbed.session.set_width(&Pid::new("PID1"), None).unwrap();
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), None);
}

#[test]
fn cached_child_follows_resize_in_same_pass() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("50%"), None);
    testbed.apply(&sized(layout_uidl("PID1", vec![child]), Some("200px"), None)).unwrap();
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("85px".to_string()));

    let cached = Uidl::new("label").with_attribute(ATTR_ID, "PID2").with_attribute(ATTR_CACHED, true);
    testbed.apply(&sized(layout_uidl("PID1", vec![cached]), Some("300px"), None)).unwrap();
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("270px"));
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("135px".to_string()));
    assert_eq!(testbed.dom().text(testbed.element("PID2")), Some("x"));
}

#[test]
fn size_set_during_pass_does_not_propagate() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("50%"), None);
    let uidl = sized(layout_uidl("PID1", vec![child]), Some("200px"), None);
    testbed.apply(&uidl).unwrap();
    testbed.apply(&uidl).unwrap();

    // two passes, each with a width set on the way: only the end of each pass runs the fix
    let layout_el = testbed.element("PID1");
    assert_eq!(testbed.dom().overflow_fix_count(layout_el), 2);
    assert!(!testbed.layout("PID1").render_state().is_rendering());
}

#[test]
fn strip_clears_child_sizes_on_undefined_axes() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("40px"), Some("20px"));
    let layout = sized(layout_uidl("PID1", vec![child.clone()]), None, Some("100px")).with_attribute(ATTR_STRIP, true);
    testbed.apply(&layout).unwrap();

    assert!(testbed.layout("PID1").strip_dimensions());
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), None);
    assert_eq!(inline(&testbed, "PID2", STYLE_HEIGHT), Some("20px".to_string()));

    // without strip the sizes stay
    testbed.apply(&sized(layout_uidl("PID1", vec![child]), None, Some("100px"))).unwrap();
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("40px".to_string()));
}

#[test]
fn request_layout_strips_and_reports_fixed_size() {
    let mut testbed = testbed();
    let child = sized(label_uidl("PID2", "x"), Some("40px"), Some("20px"));
    let layout = sized(layout_uidl("PID1", vec![child]), Some("300px"), None).with_attribute(ATTR_STRIP, true);
    testbed.apply(&layout).unwrap();
    assert_eq!(inline(&testbed, "PID2", STYLE_WIDTH), Some("40px".to_string()));

    let child_pid = Pid::new("PID2");
    let child_el = testbed.element("PID2");
    testbed.session.dom_mut().set_style_property(child_el, STYLE_HEIGHT, "33px");
    let fixed = testbed
        .session
        .with_paintable(&Pid::new("PID1"), |p, s| {
            p.as_container_mut().unwrap().request_layout(&[child_pid.clone()], s)
        })
        .unwrap();
    assert!(!fixed);
    assert_eq!(inline(&testbed, "PID2", STYLE_HEIGHT), None);

    testbed.session.set_height(&Pid::new("PID1"), Some(100)).unwrap();
    let fixed = testbed
        .session
        .with_paintable(&Pid::new("PID1"), |p, s| p.as_container_mut().unwrap().request_layout(&[], s))
        .unwrap();
    assert!(fixed);
}

#[test]
fn style_change_remeasures_box() {
    let mut testbed = testbed();
    testbed.apply(&sized(layout_uidl("PID1", vec![]), Some("200px"), None)).unwrap();
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("170px"));

    let wide = sized(layout_uidl("PID1", vec![]), Some("200px"), None).with_attribute(ATTR_STYLE, "wide");
    testbed.apply(&wide).unwrap();
    assert_eq!(testbed.dom().rule_property(".v-simplelayout-PID1", STYLE_WIDTH), Some("160px"));
    let classes = testbed.session.dom().class_names(testbed.element("PID1"));
    assert_eq!(classes, vec!["v-simplelayout", "v-simplelayout-wide", "v-simplelayout-PID1"]);
}
