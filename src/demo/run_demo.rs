use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

use crate::client::client_error::ClientError;
use crate::client::memory_dom::MemoryDom;
use crate::client::session::ClientSession;
use crate::client::v_simple_layout::{ReconcileStats, VSimpleLayout};
use crate::config::config::Config;
use crate::demo::demo_error::DemoError;
use crate::server::button::Button;
use crate::server::component::{find_by_pid, Component, ComponentHandle, ComponentRef};
use crate::server::label::Label;
use crate::server::layout_error::LayoutError;
use crate::server::simple_layout::SimpleLayout;
use crate::uidl::paint_target::PaintTarget;
use crate::uidl::pid::Pid;
use crate::uidl::variable_change::{MouseDetails, VariableChange};

/// What happened during a demo run, for the caller to check or print.
#[derive(Debug, Default)]
pub struct DemoReport {
    pub passes: usize,
    pub button_clicks: usize,
    pub layout_clicks: usize,
    pub last_stats: ReconcileStats,
    pub errors: Vec<ClientError>,
}

struct DemoServer {
    root: ComponentHandle<SimpleLayout>,
    greeting: ComponentRef,
    button: ComponentHandle<Button>,
    layout_clicks: Arc<AtomicUsize>,
    wire: Sender<String>,
}

impl DemoServer {
    fn new(config: &Config, wire: Sender<String>) -> Result<Self, DemoError> {
        let root = ComponentHandle::new(SimpleLayout::new().with_strip_dimensions(config.server.strip_dimensions));
        {
            let mut guard = root.write();
            guard.state_mut().set_size_full();
            guard.state_mut().add_style_name("test");
        }

        let greeting = ComponentRef::new(Label::new("Hello from the server"));
        let button = ComponentHandle::new(Button::new("Click me"));

        let nested = ComponentHandle::new(SimpleLayout::new());
        nested
            .write()
            .add_component_with_size(ComponentRef::new(Label::new("nested")), Some("50%"), None)?;
        nested.write().state_mut().set_width_str("300px").map_err(LayoutError::from)?;

        {
            let mut guard = root.write();
            guard.add_component(greeting.clone())?;
            guard.add_component(button.as_component())?;
            guard.add_component(nested.as_component())?;
        }

        let layout_clicks = Arc::new(AtomicUsize::new(0));
        let counter = layout_clicks.clone();
        root.write().add_click_listener(move |event| {
            info!("layout {} clicked, child {:?}", event.source, event.child);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Ok(DemoServer {
            root,
            greeting,
            button,
            layout_clicks,
            wire,
        })
    }

    fn ship(&self) -> Result<(), DemoError> {
        let mut target = PaintTarget::new();
        self.root.read().paint(&mut target)?;
        let json = target.into_uidl()?.to_json()?;
        debug!("shipping {} bytes", json.len());
        if self.wire.send(json).is_err() {
            warn!("client side of the wire is gone");
        }
        self.root.write().mark_clean();
        Ok(())
    }

    fn receive(&self, changes: Vec<VariableChange>) {
        let root = self.root.as_component();
        for change in changes {
            match find_by_pid(&root, &change.pid) {
                Some(component) => component.write().change_variables(std::slice::from_ref(&change)),
                None => warn!("variable change for unknown {}", change.pid),
            }
        }
    }
}

struct DemoClient {
    session: ClientSession,
    wire: Receiver<String>,
    errors: Receiver<ClientError>,
    outbox: Receiver<VariableChange>,
}

impl DemoClient {
    fn new(config: &Config, wire: Receiver<String>) -> Self {
        let dom = MemoryDom::new().with_viewport(config.client.viewport_width, config.client.viewport_height);
        let (errors_sender, errors) = unbounded();
        let (outbox_sender, outbox) = unbounded();
        DemoClient {
            session: ClientSession::new(Box::new(dom), errors_sender, outbox_sender),
            wire,
            errors,
            outbox,
        }
    }

    // applies everything waiting on the wire, errors end up in the error channel
    fn pump(&mut self) -> usize {
        let mut passes = 0;
        while let Ok(json) = self.wire.try_recv() {
            if let Err(e) = self.session.handle_json(&json) {
                warn!("pass failed: {}", e);
            }
            passes += 1;
        }
        passes
    }

    fn click(&self, pid: &Pid) -> Result<(), DemoError> {
        let element = self
            .session
            .element_of(pid)
            .ok_or_else(|| DemoError::NotRendered(pid.to_string()))?;
        self.session.dispatch_click(element, MouseDetails::left_at(10, 10));
        Ok(())
    }

    fn dump(&self) -> String {
        self.session
            .dom()
            .as_dom::<MemoryDom>()
            .map(MemoryDom::dump)
            .unwrap_or_default()
    }
}

/*
Builds a small tree on the server side, renders it through the JSON wire into an in-memory
document, clicks around and reorders children, writing the document after each step to `out`.
 */
pub fn run_demo(config: &Config, out: &mut dyn Write) -> Result<DemoReport, DemoError> {
    let (wire_sender, wire_receiver) = unbounded();
    let server = DemoServer::new(config, wire_sender)?;
    let mut client = DemoClient::new(config, wire_receiver);
    let mut report = DemoReport::default();

    info!("session {} started", client.session.id());
    server.ship()?;
    report.passes += client.pump();
    writeln!(out, "initial:\n{}", client.dump())?;

    client.click(&server.button.read().pid())?;
    client.click(&Pid::for_widget(server.greeting.id()))?;
    server.receive(client.outbox.try_iter().collect());
    report.button_clicks = server.button.read().clicks();
    report.layout_clicks = server.layout_clicks.load(Ordering::SeqCst);

    server.root.write().replace_component(&server.greeting, &server.button.as_component())?;
    {
        let mut guard = server.root.write();
        guard.state_mut().remove_style_name("test");
        guard.state_mut().add_style_name("swapped");
    }
    server.ship()?;
    report.passes += client.pump();
    writeln!(out, "after swap:\n{}", client.dump())?;

    let root_pid = server.root.read().pid();
    report.last_stats = client
        .session
        .paintable_as::<VSimpleLayout>(&root_pid)
        .map(VSimpleLayout::last_stats)
        .ok_or_else(|| DemoError::NotRendered(root_pid.to_string()))?;
    info!("last pass: {:?}", report.last_stats);

    report.errors = client.errors.try_iter().collect();
    for e in report.errors.iter() {
        warn!("client reported: {}", e);
    }
    Ok(report)
}
