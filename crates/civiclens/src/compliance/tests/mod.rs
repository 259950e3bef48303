mod common;
mod normalize;
mod routing;
