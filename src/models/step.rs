use serde::{Deserialize, Serialize};

/// 一个讲解步骤
///
/// 由 LLM 按 JSON 契约生成，渲染层和配音层各取所需。
/// 解析完成后不再修改，顺序就是它唯一的身份。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 该步骤的数学公式（排版标记原样保留）
    pub equation: String,
    /// 对该步骤的文字解释
    pub explanation: String,
    /// 该步骤的配音旁白文本
    pub narration: String,
}

/// 有序的步骤列表
///
/// 顺序决定纵向排版位置和旁白拼接顺序。
pub type StepSequence = Vec<Step>;

/// 把所有步骤的旁白按原始顺序拼成一段完整的配音文本
///
/// 步骤之间用单个空格分隔，不去重、不重排。
pub fn narration_script(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| step.narration.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(narration: &str) -> Step {
        Step {
            equation: "x+1=2".to_string(),
            explanation: "subtract 1".to_string(),
            narration: narration.to_string(),
        }
    }

    #[test]
    fn test_narration_script_empty() {
        assert_eq!(narration_script(&[]), "");
    }

    #[test]
    fn test_narration_script_single_step() {
        let steps = vec![step("We subtract one from both sides.")];
        assert_eq!(narration_script(&steps), "We subtract one from both sides.");
    }

    #[test]
    fn test_narration_script_preserves_order() {
        let steps = vec![step("第一步。"), step("第二步。"), step("第三步。")];
        assert_eq!(narration_script(&steps), "第一步。 第二步。 第三步。");
    }

    #[test]
    fn test_narration_script_keeps_duplicates() {
        let steps = vec![step("同样的话。"), step("同样的话。")];
        assert_eq!(narration_script(&steps), "同样的话。 同样的话。");
    }

    #[test]
    fn test_step_deserializes_from_contract_json() {
        let json = r#"{"equation": "x = 1", "explanation": "最终结果", "narration": "所以 x 等于一。"}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.equation, "x = 1");
        assert_eq!(step.narration, "所以 x 等于一。");
    }

    #[test]
    fn test_step_missing_field_is_error() {
        let json = r#"{"equation": "x = 1", "explanation": "缺少旁白"}"#;
        assert!(serde_json::from_str::<Step>(json).is_err());
    }
}
