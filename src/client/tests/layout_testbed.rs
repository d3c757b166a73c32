use crossbeam_channel::{unbounded, Receiver};
use maplit::btreemap;
use serde_json::Value;

use crate::client::client_error::ClientError;
use crate::client::dom::{Dom, ElementId};
use crate::client::memory_dom::MemoryDom;
use crate::client::session::{ClientSession, PaintableFactory};
use crate::client::v_simple_layout::VSimpleLayout;
use crate::primitives::box_model::BoxModelMetrics;
use crate::uidl::pid::Pid;
use crate::uidl::uidl::{Uidl, ATTR_ID};
use crate::uidl::variable_change::VariableChange;

pub struct LayoutTestbedBuilder {
    viewport: (i32, i32),
    class_metrics: Vec<(String, BoxModelMetrics)>,
    factories: Vec<(&'static str, PaintableFactory)>,
}

impl LayoutTestbedBuilder {
    pub const DEFAULT_VIEWPORT: (i32, i32) = (800, 600);

    pub fn new() -> Self {
        LayoutTestbedBuilder {
            viewport: Self::DEFAULT_VIEWPORT,
            class_metrics: vec![],
            factories: vec![],
        }
    }

    pub fn with_viewport(self, width: i32, height: i32) -> Self {
        Self {
            viewport: (width, height),
            ..self
        }
    }

    pub fn with_class_metrics(mut self, class_name: &str, metrics: BoxModelMetrics) -> Self {
        self.class_metrics.push((class_name.to_string(), metrics));
        self
    }

    pub fn with_factory(mut self, tag: &'static str, factory: PaintableFactory) -> Self {
        self.factories.push((tag, factory));
        self
    }

    pub fn build(self) -> LayoutTestbed {
        let mut dom = MemoryDom::new().with_viewport(self.viewport.0, self.viewport.1);
        for (class_name, metrics) in self.class_metrics.iter() {
            dom = dom.with_class_metrics(class_name, *metrics);
        }

        let (errors_sender, errors) = unbounded();
        let (outbox_sender, outbox) = unbounded();
        let mut session = ClientSession::new(Box::new(dom), errors_sender, outbox_sender);
        for (tag, factory) in self.factories {
            session.register_factory(tag, factory);
        }

        LayoutTestbed { session, errors, outbox }
    }
}

pub struct LayoutTestbed {
    pub session: ClientSession,
    pub errors: Receiver<ClientError>,
    pub outbox: Receiver<VariableChange>,
}

impl LayoutTestbed {
    pub fn apply(&mut self, uidl: &Uidl) -> Result<(), ClientError> {
        self.session.handle_uidl(uidl)
    }

    pub fn dom(&self) -> &MemoryDom {
        self.session.dom().as_dom::<MemoryDom>().unwrap()
    }

    pub fn dom_mut(&mut self) -> &mut MemoryDom {
        self.session.dom_mut().as_dom_mut::<MemoryDom>().unwrap()
    }

    pub fn element(&self, pid: &str) -> ElementId {
        self.session.element_of(&Pid::new(pid)).unwrap()
    }

    pub fn layout(&self, pid: &str) -> &VSimpleLayout {
        self.session.paintable_as::<VSimpleLayout>(&Pid::new(pid)).unwrap()
    }

    pub fn rendered(&self, pid: &str) -> Vec<String> {
        self.layout(pid)
            .mounted_children(&self.session)
            .iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    pub fn drain_errors(&self) -> Vec<ClientError> {
        self.errors.try_iter().collect()
    }

    pub fn drain_outbox(&self) -> Vec<VariableChange> {
        self.outbox.try_iter().collect()
    }
}

pub fn layout_uidl(pid: &str, children: Vec<Uidl>) -> Uidl {
    Uidl {
        tag: "simplelayout".to_string(),
        attributes: btreemap! {
            ATTR_ID.to_string() => Value::from(pid),
        },
        children,
    }
}

pub fn label_uidl(pid: &str, text: &str) -> Uidl {
    Uidl {
        tag: "label".to_string(),
        attributes: btreemap! {
            ATTR_ID.to_string() => Value::from(pid),
            "text".to_string() => Value::from(text),
        },
        children: vec![],
    }
}

pub fn labels(pids: &[&str]) -> Vec<Uidl> {
    pids.iter().map(|pid| label_uidl(pid, pid)).collect()
}
