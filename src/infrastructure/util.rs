use crate::application::ports::util::SlugGenerator;
use crate::domain::slug::normalize;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        normalize(input)
    }
}
