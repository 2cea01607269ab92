//! Property tests over arbitrary valid references in the standard canon

mod helpers;

use proptest::prelude::*;
use scripture_refs::error::Bound;
use scripture_refs::{Book, Canon, NormalizedReference, ReferenceError, VerseId};

use helpers::service;

fn arb_book() -> impl Strategy<Value = Book> {
    let books: Vec<Book> = Canon::standard().books().collect();
    prop::sample::select(books)
}

/// A valid (book, chapter, verse) in the standard canon
fn arb_position() -> impl Strategy<Value = (Book, u16, u16)> {
    arb_book()
        .prop_flat_map(|book| {
            let chapters = Canon::standard().chapter_count(book).unwrap_or(1);
            (Just(book), 1..=chapters)
        })
        .prop_flat_map(|(book, chapter)| {
            let verses = Canon::standard().verse_count(book, chapter).unwrap_or(1);
            (Just(book), Just(chapter), 1..=verses)
        })
}

fn arb_reference() -> impl Strategy<Value = NormalizedReference> {
    (arb_position(), arb_position()).prop_map(|(a, b)| {
        let id = |(book, chapter, verse): (Book, u16, u16)| VerseId::new(book, chapter, verse);
        let (start, end) = if id(a) <= id(b) { (a, b) } else { (b, a) };
        if start.0 == end.0 {
            NormalizedReference::new(start.0, (start.1, start.2), (end.1, end.2))
        } else {
            NormalizedReference::cross_book(start.0, (start.1, start.2), end.0, (end.1, end.2))
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        max_global_rejects: 65536,
        ..ProptestConfig::default()
    })]

    #[test]
    fn generated_references_are_valid(reference in arb_reference()) {
        prop_assert_eq!(reference.validate(&Canon::standard()), Ok(()));
    }

    #[test]
    fn verses_cover_chapters(reference in arb_reference()) {
        let service = service();
        let chapters = service.count_chapters(&reference).unwrap();
        let verses = service.count_verses(&reference).unwrap();
        prop_assert!(chapters >= 1);
        prop_assert!(verses >= chapters);
    }

    #[test]
    fn single_book_counts_one_book(reference in arb_reference()) {
        prop_assume!(!reference.is_cross_book());
        prop_assert_eq!(service().count_books(&reference), Ok(1));
    }

    #[test]
    fn whole_book_chapters_match_canon(book in arb_book()) {
        let canon = Canon::standard();
        let reference = NormalizedReference::whole_book(&canon, book).unwrap();
        prop_assert_eq!(
            service().count_chapters(&reference),
            Ok(u64::from(canon.chapter_count(book).unwrap()))
        );
    }

    #[test]
    fn rendered_text_scans_back(reference in arb_reference()) {
        let service = service();
        let compact = reference.render(service.canon()).unwrap();
        let explicit = reference.to_string();

        let from_compact = service.get_references(&compact);
        prop_assert_eq!(&from_compact.references, &vec![reference], "compact {:?}", compact);
        let from_explicit = service.get_references(&explicit);
        prop_assert_eq!(&from_explicit.references, &vec![reference], "explicit {:?}", explicit);
    }

    #[test]
    fn aggregation_is_idempotent(refs in prop::collection::vec(arb_reference(), 0..8)) {
        let service = service();
        let first = (service.count_books(&refs), service.count_chapters(&refs), service.count_verses(&refs));
        let second = (service.count_books(&refs), service.count_chapters(&refs), service.count_verses(&refs));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sequence_count_is_sum_of_parts(refs in prop::collection::vec(arb_reference(), 0..8)) {
        let service = service();
        let parts: u64 = refs.iter().map(|r| service.count_verses(r).unwrap()).sum();
        prop_assert_eq!(service.count_verses(&refs), Ok(parts));
    }

    #[test]
    fn book_boundaries(book in arb_book()) {
        let canon = Canon::standard();
        let (chapter, verse) = canon.last_verse(book).unwrap();
        let last = NormalizedReference::new(book, (chapter, verse), (chapter, verse));
        prop_assert_eq!(last.validate(&canon), Ok(()));

        let text = format!("{} {}:1", book, chapter + 1);
        let extraction = service().get_references(&text);
        prop_assert!(extraction.references.is_empty());
        prop_assert_eq!(
            &extraction.rejections[0].error,
            &ReferenceError::InvalidReference {
                book,
                bound: Bound::Chapter { chapter: chapter + 1, max: chapter },
            }
        );
    }
}
