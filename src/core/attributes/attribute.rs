use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

pub trait Attribute: Any + Debug {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn arff_representation(&self) -> String;
}

pub type AttributeRef = Arc<dyn Attribute>;
