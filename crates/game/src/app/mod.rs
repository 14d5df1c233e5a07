mod bootstrap;
mod map;
mod tank;

pub(crate) use bootstrap::GameBootstrap;
