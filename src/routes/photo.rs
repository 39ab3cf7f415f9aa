use crate::resource::Resource;

/// The `photo` resource. Every action is still the scaffold.
pub struct PhotoController;

impl Resource for PhotoController {
    const NAME: &'static str = "photo";
}
