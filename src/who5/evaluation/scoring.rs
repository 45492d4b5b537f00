use super::super::domain::{
    AnswerSet, FinalScore, RawScore, ScoreError, MAX_ANSWER_VALUE, QUESTION_COUNT,
};

/// Sum five answer values into a raw score.
///
/// Errors when the slice is not exactly five values or any value leaves
/// the answer domain; with valid input the sum is guaranteed in `0..=25`.
pub fn compute_raw_score(values: &[u8]) -> Result<RawScore, ScoreError> {
    if values.len() != QUESTION_COUNT {
        return Err(ScoreError::AnswerCount {
            found: values.len(),
        });
    }
    if let Some(&value) = values.iter().find(|&&value| value > MAX_ANSWER_VALUE) {
        return Err(ScoreError::AnswerValue { value });
    }

    let sum = values.iter().map(|&value| value as u16).sum::<u16>();
    RawScore::new(sum as u8)
}

/// Apply the WHO-5 standard transform to an unchecked raw value.
///
/// `raw * 4` with exact integer arithmetic; errors when `raw > 25`.
pub fn compute_final_score(raw: u8) -> Result<FinalScore, ScoreError> {
    let raw = RawScore::new(raw)?;
    Ok(FinalScore::from_raw(raw))
}

/// Score a validated answer set. Infallible because [`AnswerSet`] already
/// guarantees the structural invariant.
pub(crate) fn score_answers(answers: &AnswerSet) -> (RawScore, FinalScore) {
    let sum = answers
        .values()
        .iter()
        .map(|&value| value as u16)
        .sum::<u16>();
    let raw = RawScore::from_validated_sum(sum as u8);
    (raw, FinalScore::from_raw(raw))
}
