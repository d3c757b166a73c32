use std::sync::Arc;

use parking_lot::Mutex;
use test_log::test;

use crate::client::dom::Dom;
use crate::client::tests::layout_testbed::{LayoutTestbed, LayoutTestbedBuilder};
use crate::server::button::Button;
use crate::server::click_event::LayoutClickEvent;
use crate::server::component::{find_by_pid, Component, ComponentHandle, ComponentRef};
use crate::server::label::Label;
use crate::server::simple_layout::SimpleLayout;
use crate::uidl::paint_target::PaintTarget;
use crate::uidl::pid::Pid;
use crate::uidl::variable_change::{LayoutClickPayload, MouseButton, MouseDetails, LAYOUT_CLICK_EVENT};

struct Setup {
    testbed: LayoutTestbed,
    root: ComponentHandle<SimpleLayout>,
    label: ComponentRef,
    button: ComponentHandle<Button>,
    events: Arc<Mutex<Vec<LayoutClickEvent>>>,
}

fn setup(with_listener: bool) -> Setup {
    let root = ComponentHandle::new(SimpleLayout::new());
    let label = ComponentRef::new(Label::new("click me"));
    let button = ComponentHandle::new(Button::new("ok"));
    root.write().add_component(label.clone()).unwrap();
    root.write().add_component(button.as_component()).unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    if with_listener {
        let e = events.clone();
        root.write().add_click_listener(move |event| e.lock().push(event.clone()));
    }

    let mut target = PaintTarget::new();
    root.read().paint(&mut target).unwrap();
    let mut testbed = LayoutTestbedBuilder::new().build();
    testbed.apply(&target.into_uidl().unwrap()).unwrap();

    Setup {
        testbed,
        root,
        label,
        button,
        events,
    }
}

fn deliver(setup: &Setup) -> usize {
    let changes = setup.testbed.drain_outbox();
    for change in changes.iter() {
        let component = find_by_pid(&setup.root.as_component(), &change.pid).unwrap();
        component.write().change_variables(std::slice::from_ref(change));
    }
    changes.len()
}

#[test]
fn click_inside_child_reaches_server_with_child() {
    let mut setup = setup(true);
    let label_el = setup.testbed.element(Pid::for_widget(setup.label.id()).as_str());
    let span = setup.testbed.session.dom_mut().create_element("span");
    setup.testbed.session.dom_mut().insert_child(label_el, span, 0);

    let details = MouseDetails {
        button: MouseButton::Right,
        ..MouseDetails::left_at(5, 6)
    };
    assert!(setup.testbed.session.dispatch_click(span, details));

    let outbox = setup.testbed.drain_outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].name, LAYOUT_CLICK_EVENT);
    assert_eq!(outbox[0].pid, Pid::for_widget(setup.root.id()));
    let payload: LayoutClickPayload = serde_json::from_value(outbox[0].value.clone()).unwrap();
    assert_eq!(payload.child, Some(Pid::for_widget(setup.label.id())));

    // the same click again, this time routed to the server
    assert!(setup.testbed.session.dispatch_click(span, details));
    assert_eq!(deliver(&setup), 1);
    let events = setup.events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].child, Some(setup.label.id()));
    assert_eq!(events[0].details.button, MouseButton::Right);
    assert_eq!(events[0].details.client_x, 5);
}

#[test]
fn click_on_layout_itself_has_no_child() {
    let setup = setup(true);
    let layout_el = setup.testbed.element(Pid::for_widget(setup.root.id()).as_str());
    assert!(setup.testbed.session.dispatch_click(layout_el, MouseDetails::left_at(0, 0)));
    assert_eq!(deliver(&setup), 1);
    assert_eq!(setup.events.lock()[0].child, None);
}

#[test]
fn without_listener_layout_ignores_clicks() {
    let setup = setup(false);
    let pid = Pid::for_widget(setup.root.id());
    assert!(!setup.testbed.layout(pid.as_str()).click_enabled());

    let label_el = setup.testbed.element(Pid::for_widget(setup.label.id()).as_str());
    assert!(!setup.testbed.session.dispatch_click(label_el, MouseDetails::default()));
    assert!(setup.testbed.drain_outbox().is_empty());
}

#[test]
fn button_takes_the_click_before_layout() {
    let setup = setup(true);
    let button_el = setup.testbed.element(Pid::for_widget(setup.button.id()).as_str());
    assert!(setup.testbed.session.dispatch_click(button_el, MouseDetails::left_at(1, 1)));
    assert_eq!(deliver(&setup), 1);

    assert_eq!(setup.button.read().clicks(), 1);
    assert!(setup.events.lock().is_empty());
    assert_eq!(setup.testbed.session.dom().parent(button_el), Some(setup.testbed.element(Pid::for_widget(setup.root.id()).as_str())));
}
