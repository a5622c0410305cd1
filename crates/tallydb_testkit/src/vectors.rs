//! Transcript test vectors.
//!
//! Each vector pairs an input transcript with the exact output it must
//! produce. They are shared by the core tests and the CLI tests.

/// A transcript and its expected output.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptVector {
    /// Short name for failure messages.
    pub name: &'static str,
    /// Newline-delimited input, usually ending with `END`.
    pub input: &'static str,
    /// Expected output, one line per processed command.
    pub output: &'static str,
}

/// All transcript vectors.
pub fn transcript_vectors() -> Vec<TranscriptVector> {
    vec![
        TranscriptVector {
            name: "basic_data",
            input: "SET ex 10\nGET ex\nUNSET ex\nGET ex\nEND\n",
            output: "\n10\n\nNULL\n",
        },
        TranscriptVector {
            name: "reverse_counts",
            input: "SET a 10\nSET b 10\nNUMEQUALTO 10\nNUMEQUALTO 20\nSET b 30\nNUMEQUALTO 10\nEND\n",
            output: "\n\n2\n0\n\n1\n",
        },
        TranscriptVector {
            name: "nested_rollback",
            input: "BEGIN\nSET a 10\nGET a\nBEGIN\nSET a 20\nGET a\nROLLBACK\nGET a\nROLLBACK\nGET a\nEND\n",
            output: "\n\n10\n\n\n20\n\n10\n\nNULL\n",
        },
        TranscriptVector {
            name: "nested_commit",
            input: "BEGIN\nSET a 30\nBEGIN\nSET a 40\nCOMMIT\nGET a\nROLLBACK\nEND\n",
            output: "\n\n\n\n\n40\nNO TRANSACTION\n",
        },
        TranscriptVector {
            name: "unset_in_transaction",
            input: "SET a 50\nBEGIN\nGET a\nSET a 60\nBEGIN\nUNSET a\nGET a\nROLLBACK\nGET a\nCOMMIT\nGET a\nEND\n",
            output: "\n\n50\n\n\n\nNULL\n\n60\n\n60\n",
        },
        TranscriptVector {
            name: "counts_across_rollback",
            input: "SET a 10\nBEGIN\nNUMEQUALTO 10\nBEGIN\nUNSET a\nNUMEQUALTO 10\nROLLBACK\nNUMEQUALTO 10\nCOMMIT\nEND\n",
            output: "\n\n1\n\n\n0\n\n1\n\n",
        },
        TranscriptVector {
            name: "count_after_rollback",
            input: "SET a 10\nSET b 10\nNUMEQUALTO 10\nUNSET a\nNUMEQUALTO 10\nGET a\nBEGIN\nSET b 30\nNUMEQUALTO 10\nROLLBACK\nNUMEQUALTO 10\nEND\n",
            output: "\n\n2\n\n1\nNULL\n\n\n0\n\n1\n",
        },
        TranscriptVector {
            name: "no_transaction",
            input: "COMMIT\nROLLBACK\nEND\n",
            output: "NO TRANSACTION\nNO TRANSACTION\n",
        },
        TranscriptVector {
            name: "ignored_input",
            input: "HELLO\n\nSET half\nGET half\nEND\n",
            output: "\n\n\nNULL\n",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::run_transcript;

    #[test]
    fn all_vectors_pass() {
        for vector in transcript_vectors() {
            assert_eq!(
                run_transcript(vector.input),
                vector.output,
                "vector {} failed",
                vector.name
            );
        }
    }

    #[test]
    fn vector_names_are_unique() {
        let vectors = transcript_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
