pub mod failing_paintable;
