// Application layer: concrete pipelines wiring sources, renderers and storage.

pub mod pipelines;
