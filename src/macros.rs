/// Builds the `(term, weight)` list of one document for [`SegmentBuilder::add`](crate::SegmentBuilder::add).
///
/// ```ignore
/// builder.add(0, doc_terms!("rust" => 1.5, "search" => 0.5))?;
/// ```
#[macro_export]
macro_rules! doc_terms(
    () => {
        {
            ::std::vec::Vec::<(::std::string::String, f32)>::new()
        }
    };
    ($($term:expr => $weight:expr),*) => {
        {
            let mut terms = ::std::vec::Vec::<(::std::string::String, f32)>::new();
            $(
                terms.push((::std::string::String::from($term), $weight as f32));
            )*
            terms
        }
    };
    // if there is a trailing comma retry with the trailing comma stripped.
    ($($term:expr => $weight:expr),+ ,) => {
        $crate::doc_terms!( $( $term => $weight ), *)
    };
);
