#![allow(missing_docs)]

use std::sync::LazyLock;

use divan::{Bencher, black_box, counter::BytesCount};
use pairmint::encoders::EncodeStrategy;
use pairmint::tokenizer::BpeTokenizer;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn english_text() -> String {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
        It's a beautiful day, and I'll be taking my 3 dogs for a walk. \
        Don't forget: the temperature is 72 degrees! \
        We've been waiting since 10:30am.\n\
        \n\
        In 2024, artificial intelligence continued to advance rapidly. \
        Large language models demonstrated remarkable capabilities. \
        The researchers couldn't believe the results they'd achieved.\n";
    paragraph.repeat(100)
}

static TRAINED: LazyLock<BpeTokenizer<u32>> = LazyLock::new(|| {
    let mut tokenizer = BpeTokenizer::new();
    tokenizer.train(english_text(), 768).unwrap();
    tokenizer
});

#[divan::bench]
fn train_512(bencher: Bencher) {
    let text = english_text();

    bencher
        .with_inputs(|| text.clone())
        .input_counter(|t| BytesCount::of_str(t))
        .bench_values(|t| {
            let mut tokenizer = BpeTokenizer::<u32>::new();
            tokenizer.train(black_box(&t), 512).unwrap();
            tokenizer
        });
}

#[divan::bench]
fn encode_priority_merge(bencher: Bencher) {
    let tokenizer = &*TRAINED;
    let text = english_text();

    bencher
        .with_inputs(|| text.clone())
        .input_counter(|t| BytesCount::of_str(t))
        .bench_values(|t| {
            EncodeStrategy::PriorityMerge
                .encode(tokenizer.vocab().unwrap(), black_box(t.as_bytes()))
        });
}

#[divan::bench]
fn encode_rank_sweep(bencher: Bencher) {
    let tokenizer = &*TRAINED;
    let text = english_text();

    bencher
        .with_inputs(|| text.clone())
        .input_counter(|t| BytesCount::of_str(t))
        .bench_values(|t| {
            EncodeStrategy::RankSweep
                .encode(tokenizer.vocab().unwrap(), black_box(t.as_bytes()))
        });
}

#[divan::bench]
fn decode(bencher: Bencher) {
    let tokenizer = &*TRAINED;
    let tokens = tokenizer.encode(english_text()).unwrap();

    bencher
        .with_inputs(|| tokens.clone())
        .bench_values(|tokens| tokenizer.decode_bytes(black_box(&tokens)).unwrap());
}
